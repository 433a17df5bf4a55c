//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so every module enforces the same rules.

use crate::{Currency, EngineError, ResultEngine, YearMonth, money::sanitize_amount};

/// Declares a closed set of values stored as text.
///
/// Generates `as_str`, `Display`, `TryFrom<&str>` (failing with
/// `InvalidData`, since unknown text only comes from storage) and the serde
/// representation using the same text.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        $vis enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl TryFrom<&str> for $name {
            type Error = crate::EngineError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                match value {
                    $($text => Ok($name::$variant),)+
                    other => Err(crate::EngineError::InvalidData(format!(
                        "invalid {}: {other}",
                        stringify!($name)
                    ))),
                }
            }
        }
    };
}

pub(crate) use string_enum;

/// Parse a currency code stored in the DB into a strongly typed `Currency`.
pub(crate) fn model_currency(value: &str) -> ResultEngine<Currency> {
    Currency::try_from(value)
        .map_err(|_| EngineError::InvalidData(format!("invalid currency: {value}")))
}

/// Parse a `YYYY-MM` month stored in the DB.
pub(crate) fn model_month(value: &str) -> ResultEngine<YearMonth> {
    value
        .parse()
        .map_err(|_| EngineError::InvalidData(format!("invalid month: {value}")))
}

/// Reject negative amounts after coercing non-finite input to 0.
pub(crate) fn non_negative(amount: f64, label: &str) -> ResultEngine<f64> {
    let amount = sanitize_amount(amount);
    if amount < 0.0 {
        return Err(EngineError::InvalidAmount(format!(
            "{label} must be >= 0"
        )));
    }
    Ok(amount)
}

/// Sorted, de-duplicated copy of the given values.
pub(crate) fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = values.map(ToString::to_string).collect();
    out.sort();
    out.dedup();
    out
}
