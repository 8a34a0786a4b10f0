//! The event type returned by a query: one qualifying run of days.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed date interval `[start, end]` (both inclusive) during which the
/// queried conditions held.
///
/// Queries produce events in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// First day of the run (inclusive).
    pub start: NaiveDate,
    /// Last day of the run (inclusive).
    pub end: NaiveDate,
}

impl Event {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of days the event spans, endpoints included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
