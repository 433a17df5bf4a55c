//! Cashflow ledger API endpoints

use axum::{Json, extract::State, http::StatusCode};
use engine::{
    CashflowEntry, YearMonth,
    aggregate::TREND_MONTHS,
    commands::{CreateCashflowCmd, UpdateCashflowCmd},
    summary::{CashflowCategoryTotal, CashflowPoint, CashflowSummary},
};
use uuid::Uuid;

use crate::{
    Created, ServerError,
    extract::{ApiJson, ApiPath, ApiQuery, ReadParams, today},
    server::ServerState,
};

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<CashflowEntry>>, ServerError> {
    Ok(Json(state.engine.cashflow().await?))
}

pub async fn get(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<CashflowEntry>, ServerError> {
    Ok(Json(state.engine.cashflow_entry(id).await?))
}

/// Entries produced by one source record, which may since have been deleted.
pub async fn by_reference(
    State(state): State<ServerState>,
    ApiPath(reference_id): ApiPath<Uuid>,
) -> Result<Json<Vec<CashflowEntry>>, ServerError> {
    Ok(Json(state.engine.cashflow_for_reference(reference_id).await?))
}

pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<CreateCashflowCmd>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let id = state.engine.create_cashflow(payload).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateCashflowCmd>,
) -> Result<Json<CashflowEntry>, ServerError> {
    state.engine.update_cashflow(id, payload).await?;
    Ok(Json(state.engine.cashflow_entry(id).await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_cashflow(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn summary(
    State(state): State<ServerState>,
    ApiQuery(params): ApiQuery<ReadParams>,
) -> Result<Json<CashflowSummary>, ServerError> {
    let target = params.target(&state.engine).await?;
    let summary = state
        .engine
        .cashflow_summary(params.date_range()?, target)
        .await?;
    Ok(Json(summary))
}

pub async fn by_category(
    State(state): State<ServerState>,
    ApiQuery(params): ApiQuery<ReadParams>,
) -> Result<Json<Vec<CashflowCategoryTotal>>, ServerError> {
    let target = params.target(&state.engine).await?;
    let groups = state
        .engine
        .cashflow_by_category(params.date_range()?, target)
        .await?;
    Ok(Json(groups))
}

/// Trailing `?months=N` (default 12) ending with the current month.
pub async fn trend(
    State(state): State<ServerState>,
    ApiQuery(params): ApiQuery<ReadParams>,
) -> Result<Json<Vec<CashflowPoint>>, ServerError> {
    let target = params.target(&state.engine).await?;
    let months = params.months.unwrap_or(TREND_MONTHS);
    let trend = state
        .engine
        .cashflow_trend(months, YearMonth::of(today()), target)
        .await?;
    Ok(Json(trend))
}

pub async fn categories(
    State(state): State<ServerState>,
) -> Result<Json<Vec<String>>, ServerError> {
    Ok(Json(state.engine.cashflow_categories().await?))
}
