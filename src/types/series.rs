//! Daily time series and the shared date axis they are aligned to.
//!
//! Every variable of a station's record is stored as a `Vec<f64>` whose index
//! `i` corresponds to the calendar date `axis.date(i)`. Missing samples are
//! `f64::NAN` and never satisfy a threshold condition.

use crate::data::error::DataStoreError;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four daily variables a station records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClimateVariable {
    MinimumTemperature,
    MaximumTemperature,
    Precipitation,
    Windspeed,
}

impl ClimateVariable {
    pub const ALL: [ClimateVariable; 4] = [
        ClimateVariable::MinimumTemperature,
        ClimateVariable::MaximumTemperature,
        ClimateVariable::Precipitation,
        ClimateVariable::Windspeed,
    ];

    pub(crate) fn stem(&self) -> &'static str {
        match self {
            ClimateVariable::MinimumTemperature => "minimum_temperature",
            ClimateVariable::MaximumTemperature => "maximum_temperature",
            ClimateVariable::Precipitation => "precipitation",
            ClimateVariable::Windspeed => "windspeed",
        }
    }

    pub(crate) fn file_name(&self) -> String {
        format!("{}.csv", self.stem())
    }
}

impl fmt::Display for ClimateVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stem())
    }
}

/// An ordered daily date axis: `date(i) = epoch + i days`.
///
/// All four series of a station share one axis instance; alignment to it is
/// the data store's responsibility and is re-checked before scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateAxis {
    epoch: NaiveDate,
    len: usize,
}

impl DateAxis {
    pub fn new(epoch: NaiveDate, len: usize) -> Self {
        Self { epoch, len }
    }

    /// Axis covering `start..=end`. An end before the start yields an empty axis.
    pub fn from_range(start: NaiveDate, end: NaiveDate) -> Self {
        let days = (end - start).num_days() + 1;
        Self {
            epoch: start,
            len: days.max(0) as usize,
        }
    }

    /// The reference data's historical range: 1889-01-01 through 2015-12-31.
    pub fn default_historical() -> Self {
        let start = NaiveDate::from_ymd_opt(1889, 1, 1).expect("valid date");
        let end = NaiveDate::from_ymd_opt(2015, 12, 31).expect("valid date");
        Self::from_range(start, end)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn epoch(&self) -> NaiveDate {
        self.epoch
    }

    /// Last day on the axis, if the axis is non-empty.
    pub fn last(&self) -> Option<NaiveDate> {
        if self.len == 0 {
            None
        } else {
            Some(self.date(self.len - 1))
        }
    }

    /// Calendar date of sample `i`. `i` must be below `len()`.
    pub fn date(&self, i: usize) -> NaiveDate {
        self.epoch + Days::new(i as u64)
    }

    /// Iterator over all dates on the axis, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.epoch.iter_days().take(self.len)
    }

    /// Whole calendar years between the first and last day.
    pub fn span_years(&self) -> i32 {
        use chrono::Datelike;
        match self.last() {
            Some(last) => last.year() - self.epoch.year(),
            None => 0,
        }
    }
}

impl Default for DateAxis {
    fn default() -> Self {
        Self::default_historical()
    }
}

/// One station's complete daily record: four series aligned to a shared axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationDailyData {
    pub axis: DateAxis,
    pub minimum_temperature: Vec<f64>,
    pub maximum_temperature: Vec<f64>,
    pub precipitation: Vec<f64>,
    pub windspeed: Vec<f64>,
}

impl StationDailyData {
    fn series(&self, variable: ClimateVariable) -> &[f64] {
        match variable {
            ClimateVariable::MinimumTemperature => &self.minimum_temperature,
            ClimateVariable::MaximumTemperature => &self.maximum_temperature,
            ClimateVariable::Precipitation => &self.precipitation,
            ClimateVariable::Windspeed => &self.windspeed,
        }
    }

    /// Verifies that every series has exactly one sample per axis day.
    pub fn check_alignment(&self) -> Result<(), DataStoreError> {
        for variable in ClimateVariable::ALL {
            let found = self.series(variable).len();
            if found != self.axis.len() {
                return Err(DataStoreError::LengthMismatch {
                    variable,
                    expected: self.axis.len(),
                    found,
                });
            }
        }
        Ok(())
    }
}
