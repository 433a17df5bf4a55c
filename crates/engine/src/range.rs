//! Inclusive date and month filters used by summaries and the dashboard.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine, YearMonth};

/// Inclusive `[start, end]` date filter; a missing bound is open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> ResultEngine<Self> {
        if let (Some(start), Some(end)) = (start, end)
            && start > end
        {
            return Err(EngineError::InvalidDate(
                "invalid range: start must be <= end".to_string(),
            ));
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn all() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }

    /// Months are kept when they overlap the range.
    #[must_use]
    pub fn contains_month(&self, month: YearMonth) -> bool {
        self.months().contains(month)
    }

    /// The months touched by this range.
    #[must_use]
    pub fn months(&self) -> MonthRange {
        MonthRange {
            start: self.start.map(YearMonth::of),
            end: self.end.map(YearMonth::of),
        }
    }
}

/// Inclusive `[start, end]` month filter; a missing bound is open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRange {
    pub start: Option<YearMonth>,
    pub end: Option<YearMonth>,
}

impl MonthRange {
    pub fn new(start: Option<YearMonth>, end: Option<YearMonth>) -> ResultEngine<Self> {
        if let (Some(start), Some(end)) = (start, end)
            && start > end
        {
            return Err(EngineError::InvalidDate(
                "invalid range: start month must be <= end month".to_string(),
            ));
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one month.
    #[must_use]
    pub fn single(month: YearMonth) -> Self {
        Self {
            start: Some(month),
            end: Some(month),
        }
    }

    #[must_use]
    pub fn contains(&self, month: YearMonth) -> bool {
        self.start.is_none_or(|start| month >= start) && self.end.is_none_or(|end| month <= end)
    }
}
