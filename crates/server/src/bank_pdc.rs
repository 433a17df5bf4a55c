//! Post-dated cheque API endpoints

use axum::{Json, extract::State, http::StatusCode};
use engine::{
    BankPdc, DEFAULT_UPCOMING_DAYS,
    commands::{CreateBankPdcCmd, UpdateBankPdcCmd},
    summary::{BankTotal, PdcSummary, UpcomingCheque},
};
use uuid::Uuid;

use crate::{
    Created, ServerError,
    extract::{ApiJson, ApiPath, ApiQuery, ReadParams, today},
    server::ServerState,
};

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<BankPdc>>, ServerError> {
    Ok(Json(state.engine.bank_pdcs().await?))
}

pub async fn get(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<BankPdc>, ServerError> {
    Ok(Json(state.engine.bank_pdc(id).await?))
}

pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<CreateBankPdcCmd>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let id = state.engine.create_bank_pdc(payload).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateBankPdcCmd>,
) -> Result<Json<BankPdc>, ServerError> {
    state.engine.update_bank_pdc(id, payload).await?;
    Ok(Json(state.engine.bank_pdc(id).await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_bank_pdc(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn summary(
    State(state): State<ServerState>,
    ApiQuery(params): ApiQuery<ReadParams>,
) -> Result<Json<PdcSummary>, ServerError> {
    let target = params.target(&state.engine).await?;
    let summary = state
        .engine
        .bank_pdc_summary(params.date_range()?, target)
        .await?;
    Ok(Json(summary))
}

pub async fn by_bank(
    State(state): State<ServerState>,
    ApiQuery(params): ApiQuery<ReadParams>,
) -> Result<Json<Vec<BankTotal>>, ServerError> {
    let target = params.target(&state.engine).await?;
    let banks = state
        .engine
        .bank_pdc_by_bank(params.date_range()?, target)
        .await?;
    Ok(Json(banks))
}

pub async fn upcoming(
    State(state): State<ServerState>,
    ApiQuery(params): ApiQuery<ReadParams>,
) -> Result<Json<Vec<UpcomingCheque>>, ServerError> {
    let days = params.days.unwrap_or(DEFAULT_UPCOMING_DAYS);
    Ok(Json(state.engine.upcoming_cheques(days, today()).await?))
}

pub async fn banks(State(state): State<ServerState>) -> Result<Json<Vec<String>>, ServerError> {
    Ok(Json(state.engine.banks().await?))
}

pub async fn suppliers(State(state): State<ServerState>) -> Result<Json<Vec<String>>, ServerError> {
    Ok(Json(state.engine.suppliers().await?))
}
