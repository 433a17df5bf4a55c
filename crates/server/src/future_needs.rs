//! Future needs API endpoints

use axum::{Json, extract::State, http::StatusCode};
use engine::{
    DEFAULT_UPCOMING_MONTHS, FutureNeed, YearMonth,
    commands::{CreateFutureNeedCmd, UpdateFutureNeedCmd},
    summary::{FutureNeedSummary, MonthlyNeeds, UpcomingNeed},
};
use uuid::Uuid;

use crate::{
    Created, ServerError,
    extract::{ApiJson, ApiPath, ApiQuery, ReadParams, today},
    server::ServerState,
};

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<FutureNeed>>, ServerError> {
    Ok(Json(state.engine.future_needs().await?))
}

pub async fn get(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<FutureNeed>, ServerError> {
    Ok(Json(state.engine.future_need(id).await?))
}

pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<CreateFutureNeedCmd>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let id = state.engine.create_future_need(payload).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateFutureNeedCmd>,
) -> Result<Json<FutureNeed>, ServerError> {
    state.engine.update_future_need(id, payload).await?;
    Ok(Json(state.engine.future_need(id).await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_future_need(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Totals for `?start_month&end_month`, both optional.
pub async fn summary(
    State(state): State<ServerState>,
    ApiQuery(params): ApiQuery<ReadParams>,
) -> Result<Json<FutureNeedSummary>, ServerError> {
    let target = params.target(&state.engine).await?;
    let summary = state
        .engine
        .future_needs_summary(params.month_range()?, target)
        .await?;
    Ok(Json(summary))
}

pub async fn by_month(
    State(state): State<ServerState>,
    ApiQuery(params): ApiQuery<ReadParams>,
) -> Result<Json<Vec<MonthlyNeeds>>, ServerError> {
    let target = params.target(&state.engine).await?;
    let months = state
        .engine
        .future_needs_by_month(params.month_range()?, target)
        .await?;
    Ok(Json(months))
}

pub async fn upcoming(
    State(state): State<ServerState>,
    ApiQuery(params): ApiQuery<ReadParams>,
) -> Result<Json<Vec<UpcomingNeed>>, ServerError> {
    let months = params
        .months
        .map_or(DEFAULT_UPCOMING_MONTHS, |m| i32::try_from(m).unwrap_or(i32::MAX));
    let needs = state
        .engine
        .upcoming_needs(months, YearMonth::of(today()))
        .await?;
    Ok(Json(needs))
}
