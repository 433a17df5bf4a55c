//! Sales API endpoints

use axum::{Json, extract::State, http::StatusCode};
use engine::{
    Sale,
    commands::{CreateSaleCmd, UpdateSaleCmd},
    summary::SalesSummary,
};
use uuid::Uuid;

use crate::{
    Created, ServerError,
    extract::{ApiJson, ApiPath, ApiQuery, ReadParams},
    server::ServerState,
};

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Sale>>, ServerError> {
    Ok(Json(state.engine.sales().await?))
}

pub async fn get(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Sale>, ServerError> {
    Ok(Json(state.engine.sale(id).await?))
}

pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<CreateSaleCmd>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let id = state.engine.create_sale(payload).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

/// Patch a sale and return it with its figures recomputed.
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateSaleCmd>,
) -> Result<Json<Sale>, ServerError> {
    state.engine.update_sale(id, payload).await?;
    Ok(Json(state.engine.sale(id).await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_sale(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn summary(
    State(state): State<ServerState>,
    ApiQuery(params): ApiQuery<ReadParams>,
) -> Result<Json<SalesSummary>, ServerError> {
    let target = params.target(&state.engine).await?;
    let summary = state
        .engine
        .sales_summary(params.date_range()?, target)
        .await?;
    Ok(Json(summary))
}
