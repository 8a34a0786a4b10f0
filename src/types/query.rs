//! Query parameters: month selection, the immutable [`QuerySpec`] value
//! object, and its validation errors.

use crate::types::condition::ThresholdCondition;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bitmask over calendar months 1..=12.
///
/// A query only considers days whose month is selected. Selecting all twelve
/// months (the default) disables month filtering entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSelection(u16);

const ALL_MONTHS: u16 = 0b0001_1111_1111_1110; // bits 1..=12

impl MonthSelection {
    pub fn all() -> Self {
        Self(ALL_MONTHS)
    }

    pub fn none() -> Self {
        Self(0)
    }

    /// Builds a selection from month numbers; values outside 1..=12 are ignored.
    pub fn from_months(months: impl IntoIterator<Item = u32>) -> Self {
        months.into_iter().fold(Self::none(), Self::with)
    }

    pub fn with(self, month: u32) -> Self {
        if (1..=12).contains(&month) {
            Self(self.0 | 1 << month)
        } else {
            self
        }
    }

    pub fn contains(&self, month: u32) -> bool {
        (1..=12).contains(&month) && self.0 & (1 << month) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 & ALL_MONTHS == 0
    }

    pub fn is_all(&self) -> bool {
        self.0 & ALL_MONTHS == ALL_MONTHS
    }
}

impl Default for MonthSelection {
    fn default() -> Self {
        Self::all()
    }
}

/// Ways a [`QuerySpec`] can be malformed.
///
/// Callers are expected to validate input before submitting a query; the
/// engine re-checks defensively and fails fast without partial results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidQuerySpec {
    #[error("no threshold condition selected for any variable")]
    NoActiveConditions,

    #[error("month selection is empty")]
    EmptyMonthSelection,

    #[error("duration must be between 1 and 365 consecutive days, got {0}")]
    DurationOutOfRange(u32),
}

/// An immutable description of one query: which station, which conditions,
/// how many consecutive days, and which months to consider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    /// Index of the station in the station list.
    pub station: u32,
    /// Minimum run length in days, 1..=365. Doubles as the accumulation
    /// window for precipitation.
    pub consecutive_days: u32,
    pub temperature: ThresholdCondition,
    pub precipitation: ThresholdCondition,
    pub wind: ThresholdCondition,
    pub months: MonthSelection,
}

impl QuerySpec {
    pub fn validate(&self) -> Result<(), InvalidQuerySpec> {
        if !(1..=365).contains(&self.consecutive_days) {
            return Err(InvalidQuerySpec::DurationOutOfRange(self.consecutive_days));
        }
        if self.months.is_empty() {
            return Err(InvalidQuerySpec::EmptyMonthSelection);
        }
        let any_active = self.temperature.is_active()
            || self.precipitation.is_active()
            || self.wind.is_active();
        if !any_active {
            return Err(InvalidQuerySpec::NoActiveConditions);
        }
        Ok(())
    }

    pub(crate) fn window(&self) -> usize {
        self.consecutive_days as usize
    }
}
