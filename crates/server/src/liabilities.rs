//! Liabilities API endpoints

use axum::{Json, extract::State, http::StatusCode};
use engine::{
    DEFAULT_UPCOMING_DAYS, Liability,
    commands::{CreateLiabilityCmd, LiabilityPaymentCmd, UpdateLiabilityCmd},
    summary::{LiabilitySummary, UpcomingLiability},
};
use uuid::Uuid;

use crate::{
    Created, ServerError,
    extract::{ApiJson, ApiPath, ApiQuery, ReadParams, today},
    server::ServerState,
};

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Liability>>, ServerError> {
    Ok(Json(state.engine.liabilities().await?))
}

pub async fn get(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Liability>, ServerError> {
    Ok(Json(state.engine.liability(id).await?))
}

pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<CreateLiabilityCmd>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let id = state.engine.create_liability(payload).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateLiabilityCmd>,
) -> Result<Json<Liability>, ServerError> {
    state.engine.update_liability(id, payload).await?;
    Ok(Json(state.engine.liability(id).await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_liability(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Record a payment and return the liability with its new balance.
pub async fn pay(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<LiabilityPaymentCmd>,
) -> Result<Json<Liability>, ServerError> {
    state.engine.make_payment(id, payload).await?;
    Ok(Json(state.engine.liability(id).await?))
}

pub async fn summary(
    State(state): State<ServerState>,
    ApiQuery(params): ApiQuery<ReadParams>,
) -> Result<Json<LiabilitySummary>, ServerError> {
    let target = params.target(&state.engine).await?;
    Ok(Json(state.engine.liability_summary(target, today()).await?))
}

pub async fn upcoming(
    State(state): State<ServerState>,
    ApiQuery(params): ApiQuery<ReadParams>,
) -> Result<Json<Vec<UpcomingLiability>>, ServerError> {
    let days = params.days.unwrap_or(DEFAULT_UPCOMING_DAYS);
    Ok(Json(state.engine.upcoming_liabilities(days, today()).await?))
}

pub async fn types(State(state): State<ServerState>) -> Result<Json<Vec<String>>, ServerError> {
    Ok(Json(state.engine.liability_types().await?))
}
