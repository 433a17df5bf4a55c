//! Salaries API endpoints

use axum::{Json, extract::State, http::StatusCode};
use engine::{
    Salary,
    commands::{CreateSalaryCmd, UpdateSalaryCmd},
    summary::{Employee, MonthlySalaries, SalarySummary},
};
use uuid::Uuid;

use crate::{
    Created, ServerError,
    extract::{ApiJson, ApiPath, ApiQuery, ReadParams},
    server::ServerState,
};

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Salary>>, ServerError> {
    Ok(Json(state.engine.salaries().await?))
}

pub async fn get(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Salary>, ServerError> {
    Ok(Json(state.engine.salary(id).await?))
}

pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<CreateSalaryCmd>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let id = state.engine.create_salary(payload).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateSalaryCmd>,
) -> Result<Json<Salary>, ServerError> {
    state.engine.update_salary(id, payload).await?;
    Ok(Json(state.engine.salary(id).await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_salary(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Totals for `?month=YYYY-MM`, or for every month.
pub async fn summary(
    State(state): State<ServerState>,
    ApiQuery(params): ApiQuery<ReadParams>,
) -> Result<Json<SalarySummary>, ServerError> {
    let target = params.target(&state.engine).await?;
    Ok(Json(state.engine.salary_summary(params.month, target).await?))
}

pub async fn by_month(
    State(state): State<ServerState>,
    ApiQuery(params): ApiQuery<ReadParams>,
) -> Result<Json<Vec<MonthlySalaries>>, ServerError> {
    let target = params.target(&state.engine).await?;
    let months = state
        .engine
        .salaries_by_month(params.month_range()?, target)
        .await?;
    Ok(Json(months))
}

pub async fn employees(
    State(state): State<ServerState>,
) -> Result<Json<Vec<Employee>>, ServerError> {
    Ok(Json(state.engine.employees().await?))
}
