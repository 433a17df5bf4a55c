//! Dashboard API endpoint

use axum::{Json, extract::State};
use engine::{Dashboard, DashboardQuery};

use crate::{
    ServerError,
    extract::{ApiQuery, ReadParams, today},
    server::ServerState,
};

/// `GET /dashboard?start_date&end_date&currency`.
///
/// Without `currency` the stored display preference is read first; the
/// engine itself always receives an explicit currency.
pub async fn get(
    State(state): State<ServerState>,
    ApiQuery(params): ApiQuery<ReadParams>,
) -> Result<Json<Dashboard>, ServerError> {
    let query = DashboardQuery {
        currency: params.target(&state.engine).await?,
        range: params.date_range()?,
        today: today(),
    };
    Ok(Json(state.engine.dashboard(query).await?))
}
