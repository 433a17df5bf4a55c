use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, TransactionTrait};

use crate::{
    Currency, EngineError, Money, ResultEngine,
    currency::ExchangeRates,
    currency_settings::{self, CurrencySettings, SETTINGS_KEY},
};

use super::{Engine, with_tx};

impl Engine {
    /// The stored display preference, USD when none was ever saved.
    pub async fn currency_settings(&self) -> ResultEngine<CurrencySettings> {
        match currency_settings::Entity::find_by_id(SETTINGS_KEY.to_string())
            .one(&self.database)
            .await?
        {
            Some(model) => CurrencySettings::try_from(model),
            None => Ok(CurrencySettings::default()),
        }
    }

    pub async fn display_currency(&self) -> ResultEngine<Currency> {
        Ok(self.currency_settings().await?.selected_currency)
    }

    /// Store the display preference (create if absent, else overwrite).
    /// Concurrent writers resolve as last write wins.
    pub async fn set_display_currency(&self, currency: Currency) -> ResultEngine<CurrencySettings> {
        let now = Utc::now();
        with_tx!(self, |db_tx| {
            let existing = currency_settings::Entity::find_by_id(SETTINGS_KEY.to_string())
                .one(&db_tx)
                .await?;
            let model = currency_settings::ActiveModel::selected(currency, now);
            if existing.is_some() {
                model.update(&db_tx).await?;
            } else {
                model.insert(&db_tx).await?;
            }
            Ok::<_, EngineError>(())
        })?;
        tracing::info!(currency = %currency, "display currency changed");

        Ok(CurrencySettings {
            selected_currency: currency,
            exchange_rates: ExchangeRates::fixed(),
        })
    }

    /// Convert `amount` from `from` into the stored display currency.
    pub async fn convert_for_display(&self, amount: f64, from: Currency) -> ResultEngine<Money> {
        let target = self.display_currency().await?;
        Ok(Money::new(amount, from).convert(target))
    }

    #[must_use]
    pub fn exchange_rates(&self) -> ExchangeRates {
        ExchangeRates::fixed()
    }
}
