use crate::types::series::ClimateVariable;
use chrono::NaiveDate;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataStoreError {
    #[error("Failed to scan data file '{0}'")]
    FileScan(PathBuf, #[source] PolarsError),

    #[error("Failed to collect {variable} data for station {station}")]
    FrameCollect {
        station: u32,
        variable: ClimateVariable,
        #[source]
        source: PolarsError,
    },

    #[error("Missing or unreadable column '{column}' in {variable} data")]
    Column {
        variable: ClimateVariable,
        column: &'static str,
        #[source]
        source: PolarsError,
    },

    #[error("Unparseable date '{value}' in {variable} data")]
    DateParse {
        variable: ClimateVariable,
        value: String,
    },

    #[error("No data found for station {0}")]
    StationNotFound(u32),

    #[error("{variable} series has {found} samples, expected {expected}")]
    LengthMismatch {
        variable: ClimateVariable,
        expected: usize,
        found: usize,
    },

    #[error("{variable} series starts at {found}, expected axis epoch {expected}")]
    AxisMismatch {
        variable: ClimateVariable,
        expected: NaiveDate,
        found: NaiveDate,
    },
}
