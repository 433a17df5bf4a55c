//! Calendar month keys (`YYYY-MM`).

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// A calendar month, ordered chronologically.
///
/// Serialized as `YYYY-MM`, which also sorts lexicographically in
/// chronological order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, EngineError> {
        if !(1..=12).contains(&month) || !(0..=9999).contains(&year) {
            return Err(EngineError::InvalidDate(format!(
                "invalid month: {year:04}-{month:02}"
            )));
        }
        Ok(Self { year, month })
    }

    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// First day of the month.
    #[must_use]
    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Moves by `delta` months (negative goes back in time).
    #[must_use]
    pub fn shift(self, delta: i32) -> Self {
        let index = self.year * 12 + (self.month as i32 - 1) + delta;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// Signed number of months from `self` to `other`.
    #[must_use]
    pub fn months_until(self, other: YearMonth) -> i32 {
        (other.year - self.year) * 12 + (other.month as i32 - self.month as i32)
    }

    /// The `count` months ending at `self` (inclusive), oldest first.
    #[must_use]
    pub fn trailing(self, count: u32) -> Vec<YearMonth> {
        (0..count as i32)
            .rev()
            .map(|back| self.shift(-back))
            .collect()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidDate(format!("invalid month: {s}"));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let month: YearMonth = "2024-03".parse().unwrap();
        assert_eq!(month.year(), 2024);
        assert_eq!(month.month(), 3);
        assert_eq!(month.to_string(), "2024-03");
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("2024-3".parse::<YearMonth>().is_err());
        assert!("202403".parse::<YearMonth>().is_err());
    }

    #[test]
    fn shift_crosses_year_boundaries() {
        let jan = YearMonth::new(2025, 1).unwrap();
        assert_eq!(jan.shift(-1).to_string(), "2024-12");
        assert_eq!(jan.shift(-13).to_string(), "2023-12");
        assert_eq!(jan.shift(11).to_string(), "2025-12");
        assert_eq!(jan.shift(12).to_string(), "2026-01");
    }

    #[test]
    fn trailing_window_is_oldest_first_and_inclusive() {
        let end = YearMonth::new(2025, 2).unwrap();
        let window = end.trailing(12);
        assert_eq!(window.len(), 12);
        assert_eq!(window[0].to_string(), "2024-03");
        assert_eq!(window[11], end);
    }

    #[test]
    fn months_until_is_signed() {
        let a = YearMonth::new(2024, 11).unwrap();
        let b = YearMonth::new(2025, 2).unwrap();
        assert_eq!(a.months_until(b), 3);
        assert_eq!(b.months_until(a), -3);
    }
}
