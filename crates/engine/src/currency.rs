use serde::{Deserialize, Serialize};

use crate::{EngineError, money::sanitize_amount};

/// Units of `SAR` bought by one `USD`.
pub const USD_TO_SAR: f64 = 3.75;
/// Units of `AED` bought by one `USD`.
pub const USD_TO_AED: f64 = 3.67;

/// Currency tag carried by every monetary record.
///
/// Rates are fixed and anchored on `USD`; there is no rate history. A record
/// keeps the currency it was stored with, conversion only happens when
/// amounts are read for display or aggregation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Sar,
    Aed,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Usd, Currency::Sar, Currency::Aed];

    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Sar => "SAR",
            Currency::Aed => "AED",
        }
    }

    /// Human readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Currency::Usd => "US Dollar",
            Currency::Sar => "Saudi Riyal",
            Currency::Aed => "UAE Dirham",
        }
    }

    /// Units of this currency bought by one `USD`.
    #[must_use]
    pub const fn per_usd(self) -> f64 {
        match self {
            Currency::Usd => 1.0,
            Currency::Sar => USD_TO_SAR,
            Currency::Aed => USD_TO_AED,
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "SAR" => Ok(Currency::Sar),
            "AED" => Ok(Currency::Aed),
            other => Err(EngineError::InvalidCurrency(format!(
                "unsupported currency: {other}"
            ))),
        }
    }
}

/// Converts `amount` between two currencies through `USD`.
///
/// Identical currencies return the input untouched so no floating error is
/// introduced. Non-finite amounts are treated as 0. No rounding is applied.
#[must_use]
pub fn convert(amount: f64, from: Currency, to: Currency) -> f64 {
    let amount = sanitize_amount(amount);
    if from == to {
        return amount;
    }
    let usd = amount / from.per_usd();
    usd * to.per_usd()
}

/// Multiplier that turns one unit of `from` into `to`.
#[must_use]
pub fn exchange_rate(from: Currency, to: Currency) -> f64 {
    if from == to {
        return 1.0;
    }
    to.per_usd() / from.per_usd()
}

/// Cross rates derived from the fixed anchors.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRates {
    pub usd_to_sar: f64,
    pub usd_to_aed: f64,
    pub sar_to_usd: f64,
    pub aed_to_usd: f64,
    pub sar_to_aed: f64,
    pub aed_to_sar: f64,
}

impl ExchangeRates {
    #[must_use]
    pub fn fixed() -> Self {
        Self {
            usd_to_sar: exchange_rate(Currency::Usd, Currency::Sar),
            usd_to_aed: exchange_rate(Currency::Usd, Currency::Aed),
            sar_to_usd: exchange_rate(Currency::Sar, Currency::Usd),
            aed_to_usd: exchange_rate(Currency::Aed, Currency::Usd),
            sar_to_aed: exchange_rate(Currency::Sar, Currency::Aed),
            aed_to_sar: exchange_rate(Currency::Aed, Currency::Sar),
        }
    }
}

impl Default for ExchangeRates {
    fn default() -> Self {
        Self::fixed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn identity_is_exact() {
        for currency in Currency::ALL {
            let amount = 0.1 + 0.2;
            assert_eq!(convert(amount, currency, currency), amount);
        }
    }

    #[test]
    fn round_trip_between_every_pair() {
        for from in Currency::ALL {
            for to in Currency::ALL {
                for amount in [0.0, 1.0, 13.37, 1_000_000.25, -42.5] {
                    let back = convert(convert(amount, from, to), to, from);
                    assert!(
                        (back - amount).abs() < EPSILON,
                        "{amount} {from}->{to} came back as {back}"
                    );
                }
            }
        }
    }

    #[test]
    fn aed_to_usd_uses_fixed_anchor() {
        let usd = convert(50.0, Currency::Aed, Currency::Usd);
        assert!((usd - 13.6240).abs() < 0.001);
        assert_eq!(format!("{usd:.2}"), "13.62");
    }

    #[test]
    fn sar_to_aed_goes_through_usd() {
        let aed = convert(375.0, Currency::Sar, Currency::Aed);
        assert!((aed - 367.0).abs() < EPSILON);
    }

    #[test]
    fn non_finite_amounts_become_zero() {
        assert_eq!(convert(f64::NAN, Currency::Usd, Currency::Sar), 0.0);
        assert_eq!(convert(f64::INFINITY, Currency::Sar, Currency::Sar), 0.0);
        assert_eq!(convert(f64::NEG_INFINITY, Currency::Aed, Currency::Usd), 0.0);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Currency::try_from(" sar ").unwrap(), Currency::Sar);
        assert!(Currency::try_from("EUR").is_err());
    }

    #[test]
    fn cross_rates_are_consistent() {
        let rates = ExchangeRates::fixed();
        assert_eq!(rates.usd_to_sar, 3.75);
        assert!((rates.sar_to_usd * rates.usd_to_sar - 1.0).abs() < EPSILON);
        assert!((rates.sar_to_aed - 3.67 / 3.75).abs() < EPSILON);
        assert_eq!(exchange_rate(Currency::Aed, Currency::Aed), 1.0);
    }
}
