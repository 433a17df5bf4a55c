use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, router, run, run_with_listener};

mod bank_pdc;
mod business_in_hand;
mod cashflow;
mod currency;
mod dashboard;
mod expenses;
mod export;
mod extract;
mod future_needs;
mod liabilities;
mod salaries;
mod sales;
mod server;

pub enum ServerError {
    Engine(EngineError),
    /// The request could not be decoded.
    Generic(String),
    /// A failure on our side that has already been logged.
    Internal(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

/// Body returned by every create endpoint.
#[derive(Serialize)]
struct Created {
    id: uuid::Uuid,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::InvalidAmount(_)
        | EngineError::InvalidDate(_)
        | EngineError::InvalidCurrency(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::InvalidData(_)
        | EngineError::LedgerInconsistency { .. }
        | EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::InvalidData(reason) => {
            tracing::error!("unreadable stored record: {reason}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
            ServerError::Internal(err) => (StatusCode::INTERNAL_SERVER_ERROR, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::Generic(value.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(value: QueryRejection) -> Self {
        Self::Generic(value.body_text())
    }
}

impl From<PathRejection> for ServerError {
    fn from(value: PathRejection) -> Self {
        Self::Generic(value.body_text())
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_validation_maps_to_422() {
        for err in [
            EngineError::InvalidAmount("x".to_string()),
            EngineError::InvalidDate("x".to_string()),
            EngineError::InvalidCurrency("x".to_string()),
        ] {
            let res = ServerError::from(err).into_response();
            assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        }
    }

    #[test]
    fn ledger_inconsistency_maps_to_500() {
        let res = ServerError::from(EngineError::LedgerInconsistency {
            record_id: Uuid::new_v4(),
            reason: "disk full".to_string(),
        })
        .into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
