//! Threshold conditions that can be attached to a climate variable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A per-variable threshold condition.
///
/// Temperature conditions carry intentional asymmetry: `LowerThan` is
/// evaluated against the day's *minimum* temperature and `HigherThan` against
/// the day's *maximum*, because a cold extreme is defined by how cold the day
/// got and a hot extreme by how hot. Precipitation and windspeed compare
/// against their own series.
///
/// # Examples
///
/// ```
/// use heatwave::ThresholdCondition;
///
/// let heat = ThresholdCondition::HigherThan(35.0);
/// assert!(heat.is_active());
/// assert!(!ThresholdCondition::Any.is_active());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ThresholdCondition {
    /// No requirement; the variable is excluded from the query entirely.
    #[default]
    Any,
    /// The sample must be strictly below the given value.
    LowerThan(f64),
    /// The sample must be strictly above the given value.
    HigherThan(f64),
}

impl ThresholdCondition {
    /// Whether this condition contributes to the query at all.
    pub fn is_active(&self) -> bool {
        !matches!(self, ThresholdCondition::Any)
    }
}

impl fmt::Display for ThresholdCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdCondition::Any => write!(f, "any"),
            ThresholdCondition::LowerThan(v) => write!(f, "lower than {v}"),
            ThresholdCondition::HigherThan(v) => write!(f, "higher than {v}"),
        }
    }
}
