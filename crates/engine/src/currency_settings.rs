//! Persisted display-currency preference.
//!
//! Single row keyed by [`SETTINGS_KEY`]. The rate snapshot is derived from the
//! fixed anchors on every read rather than stored.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{Currency, EngineError, currency::ExchangeRates, util::model_currency};

pub(crate) const SETTINGS_KEY: &str = "display";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurrencySettings {
    pub selected_currency: Currency,
    pub exchange_rates: ExchangeRates,
}

impl Default for CurrencySettings {
    fn default() -> Self {
        Self {
            selected_currency: Currency::Usd,
            exchange_rates: ExchangeRates::fixed(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "currency_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub selected_currency: String,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub(crate) fn selected(currency: Currency, now: DateTime<Utc>) -> Self {
        Self {
            key: ActiveValue::Set(SETTINGS_KEY.to_string()),
            selected_currency: ActiveValue::Set(currency.code().to_string()),
            updated_at: ActiveValue::Set(now),
        }
    }
}

impl TryFrom<Model> for CurrencySettings {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            selected_currency: model_currency(&model.selected_currency)?,
            exchange_rates: ExchangeRates::fixed(),
        })
    }
}
