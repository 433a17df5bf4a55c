use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Currency;

/// Coerces a monetary input into a usable number.
///
/// `NaN` and infinities become `0.0`; every other value is returned as is.
#[must_use]
pub fn sanitize_amount(amount: f64) -> f64 {
    if amount.is_finite() { amount } else { 0.0 }
}

/// An amount tagged with its currency, used for display.
///
/// Display rounds to 2 fraction digits and groups thousands:
///
/// ```rust
/// use engine::{Currency, Money};
///
/// assert_eq!(Money::new(1234.5, Currency::Usd).to_string(), "$1,234.50");
/// assert_eq!(Money::new(-3.0, Currency::Aed).to_string(), "-3.00 د.إ");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Money {
    pub amount: f64,
    pub currency: Currency,
}

impl Money {
    #[must_use]
    pub fn new(amount: f64, currency: Currency) -> Self {
        Self {
            amount: sanitize_amount(amount),
            currency,
        }
    }

    /// Returns the same value expressed in `target`.
    #[must_use]
    pub fn convert(self, target: Currency) -> Self {
        Self {
            amount: crate::currency::convert(self.amount, self.currency, target),
            currency: target,
        }
    }
}

impl Currency {
    /// Symbol used when formatting amounts.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Sar => "ر.س",
            Currency::Aed => "د.إ",
        }
    }
}

/// Formats `amount` with 2 fraction digits and `,` thousands separators.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    let cents = (sanitize_amount(amount) * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let units = (abs / 100).to_string();
    let fraction = abs % 100;

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{sign}{grouped}.{fraction:02}")
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = format_amount(self.amount);
        match self.currency {
            Currency::Usd => match formatted.strip_prefix('-') {
                Some(abs) => write!(f, "-{}{abs}", self.currency.symbol()),
                None => write!(f, "{}{formatted}", self.currency.symbol()),
            },
            Currency::Sar | Currency::Aed => {
                write!(f, "{formatted} {}", self.currency.symbol())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_groups_thousands() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(0.005), "0.01");
        assert_eq!(format_amount(999.999), "1,000.00");
        assert_eq!(format_amount(1_234_567.8), "1,234,567.80");
        assert_eq!(format_amount(-1050.5), "-1,050.50");
    }

    #[test]
    fn display_places_symbols() {
        assert_eq!(Money::new(10.5, Currency::Usd).to_string(), "$10.50");
        assert_eq!(Money::new(-10.5, Currency::Usd).to_string(), "-$10.50");
        assert_eq!(Money::new(2500.0, Currency::Sar).to_string(), "2,500.00 ر.س");
    }

    #[test]
    fn nan_formats_as_zero() {
        assert_eq!(Money::new(f64::NAN, Currency::Usd).to_string(), "$0.00");
    }
}
