//! Extractors and query parameters shared by every handler.
//!
//! The wrappers only swap axum's plain-text rejections for the JSON error
//! body of [`ServerError`].

use axum::extract::{FromRequest, FromRequestParts};
use chrono::{NaiveDate, Utc};
use engine::{Currency, DateRange, Engine, MonthRange, YearMonth};
use serde::Deserialize;

use crate::ServerError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ServerError))]
pub struct ApiQuery<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ServerError))]
pub struct ApiPath<T>(pub T);

/// Optional filters accepted by summary and breakdown reads.
#[derive(Debug, Default, Deserialize)]
pub struct ReadParams {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub month: Option<YearMonth>,
    pub start_month: Option<YearMonth>,
    pub end_month: Option<YearMonth>,
    pub days: Option<i64>,
    pub months: Option<u32>,
    pub currency: Option<String>,
}

impl ReadParams {
    pub fn date_range(&self) -> Result<DateRange, ServerError> {
        Ok(DateRange::new(self.start_date, self.end_date)?)
    }

    pub fn month_range(&self) -> Result<MonthRange, ServerError> {
        Ok(MonthRange::new(self.start_month, self.end_month)?)
    }

    /// The requested currency, or the stored display preference.
    pub async fn target(&self, engine: &Engine) -> Result<Currency, ServerError> {
        match self.currency.as_deref() {
            Some(code) => Ok(Currency::try_from(code)?),
            None => Ok(engine.display_currency().await?),
        }
    }
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
