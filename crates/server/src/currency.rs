//! Currency preference and conversion endpoints

use axum::{Json, extract::State};
use engine::{Currency, CurrencySettings, ExchangeRates, Money};
use serde::Deserialize;

use crate::{
    ServerError,
    extract::{ApiJson, ApiQuery},
    server::ServerState,
};

#[derive(Debug, Deserialize)]
pub struct CurrencyUpdate {
    pub selected_currency: String,
}

#[derive(Debug, Deserialize)]
pub struct ConvertParams {
    pub amount: f64,
    pub from: String,
    pub to: String,
}

pub async fn get(State(state): State<ServerState>) -> Result<Json<CurrencySettings>, ServerError> {
    Ok(Json(state.engine.currency_settings().await?))
}

pub async fn set(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<CurrencyUpdate>,
) -> Result<Json<CurrencySettings>, ServerError> {
    let currency = Currency::try_from(payload.selected_currency.as_str())?;
    Ok(Json(state.engine.set_display_currency(currency).await?))
}

pub async fn rates(State(state): State<ServerState>) -> Json<ExchangeRates> {
    Json(state.engine.exchange_rates())
}

pub async fn convert(
    ApiQuery(params): ApiQuery<ConvertParams>,
) -> Result<Json<Money>, ServerError> {
    let from = Currency::try_from(params.from.as_str())?;
    let to = Currency::try_from(params.to.as_str())?;
    Ok(Json(Money::new(params.amount, from).convert(to)))
}
