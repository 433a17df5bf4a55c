//! Expenses API endpoints

use axum::{Json, extract::State, http::StatusCode};
use engine::{
    Expense,
    commands::{CreateExpenseCmd, UpdateExpenseCmd},
    summary::{CategoryTotal, ExpenseSummary},
};
use uuid::Uuid;

use crate::{
    Created, ServerError,
    extract::{ApiJson, ApiPath, ApiQuery, ReadParams},
    server::ServerState,
};

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Expense>>, ServerError> {
    Ok(Json(state.engine.expenses().await?))
}

pub async fn get(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Expense>, ServerError> {
    Ok(Json(state.engine.expense(id).await?))
}

pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<CreateExpenseCmd>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let id = state.engine.create_expense(payload).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateExpenseCmd>,
) -> Result<Json<Expense>, ServerError> {
    state.engine.update_expense(id, payload).await?;
    Ok(Json(state.engine.expense(id).await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_expense(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn summary(
    State(state): State<ServerState>,
    ApiQuery(params): ApiQuery<ReadParams>,
) -> Result<Json<ExpenseSummary>, ServerError> {
    let target = params.target(&state.engine).await?;
    let summary = state
        .engine
        .expense_summary(params.date_range()?, target)
        .await?;
    Ok(Json(summary))
}

pub async fn by_category(
    State(state): State<ServerState>,
    ApiQuery(params): ApiQuery<ReadParams>,
) -> Result<Json<Vec<CategoryTotal>>, ServerError> {
    let target = params.target(&state.engine).await?;
    let groups = state
        .engine
        .expenses_by_category(params.date_range()?, target)
        .await?;
    Ok(Json(groups))
}

pub async fn categories(
    State(state): State<ServerState>,
) -> Result<Json<Vec<String>>, ServerError> {
    Ok(Json(state.engine.expense_categories().await?))
}
