//! Business in hand API endpoints

use axum::{Json, extract::State, http::StatusCode};
use engine::{
    BusinessInHand, DEFAULT_UPCOMING_DAYS,
    commands::{CreateBusinessInHandCmd, UpdateBusinessInHandCmd},
    summary::{DatedPipelineItem, PipelineSummary, PipelineTypeTotal},
};
use uuid::Uuid;

use crate::{
    Created, ServerError,
    extract::{ApiJson, ApiPath, ApiQuery, ReadParams, today},
    server::ServerState,
};

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<BusinessInHand>>, ServerError> {
    Ok(Json(state.engine.business_in_hand().await?))
}

pub async fn get(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<BusinessInHand>, ServerError> {
    Ok(Json(state.engine.business_in_hand_item(id).await?))
}

pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<CreateBusinessInHandCmd>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let id = state.engine.create_business_in_hand(payload).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

/// Patch an item. Moving it to `received` books the inflow once.
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateBusinessInHandCmd>,
) -> Result<Json<BusinessInHand>, ServerError> {
    state.engine.update_business_in_hand(id, payload).await?;
    Ok(Json(state.engine.business_in_hand_item(id).await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_business_in_hand(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn summary(
    State(state): State<ServerState>,
    ApiQuery(params): ApiQuery<ReadParams>,
) -> Result<Json<PipelineSummary>, ServerError> {
    let target = params.target(&state.engine).await?;
    Ok(Json(state.engine.business_in_hand_summary(target).await?))
}

pub async fn by_type(
    State(state): State<ServerState>,
    ApiQuery(params): ApiQuery<ReadParams>,
) -> Result<Json<Vec<PipelineTypeTotal>>, ServerError> {
    let target = params.target(&state.engine).await?;
    Ok(Json(state.engine.business_in_hand_by_type(target).await?))
}

pub async fn upcoming(
    State(state): State<ServerState>,
    ApiQuery(params): ApiQuery<ReadParams>,
) -> Result<Json<Vec<DatedPipelineItem>>, ServerError> {
    let days = params.days.unwrap_or(DEFAULT_UPCOMING_DAYS);
    Ok(Json(state.engine.upcoming_business(days, today()).await?))
}

pub async fn overdue(
    State(state): State<ServerState>,
) -> Result<Json<Vec<DatedPipelineItem>>, ServerError> {
    Ok(Json(state.engine.overdue_business(today()).await?))
}
