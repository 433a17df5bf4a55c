//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when an update/delete targets a missing record.
//! - [`InvalidAmount`] thrown when a monetary input breaks a record invariant.
//! - [`LedgerInconsistency`] thrown when a record was written but its
//!   cashflow entry could not be projected.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`LedgerInconsistency`]: EngineError::LedgerInconsistency
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),
    #[error("Invalid stored data: {0}")]
    InvalidData(String),
    #[error("record {record_id} saved but its ledger entry was not: {reason}")]
    LedgerInconsistency { record_id: Uuid, reason: String },
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (Self::InvalidCurrency(a), Self::InvalidCurrency(b)) => a == b,
            (Self::InvalidData(a), Self::InvalidData(b)) => a == b,
            (
                Self::LedgerInconsistency {
                    record_id: a,
                    reason: ra,
                },
                Self::LedgerInconsistency {
                    record_id: b,
                    reason: rb,
                },
            ) => a == b && ra == rb,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
