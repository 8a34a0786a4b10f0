//! File-backed [`DataStore`] reading one CSV per climate variable.
//!
//! Each file (`minimum_temperature.csv`, `maximum_temperature.csv`,
//! `precipitation.csv`, `windspeed.csv`) holds `date,station,value` rows for
//! every station. Loading filters to the requested station, sorts by date and
//! checks the result against the shared axis. Empty `value` fields become NaN
//! and never satisfy a condition.

use crate::data::error::DataStoreError;
use crate::data::store::DataStore;
use crate::types::series::{ClimateVariable, DateAxis, StationDailyData};
use chrono::NaiveDate;
use log::{debug, info};
use polars::prelude::{col, lit, DataFrame, DataType, LazyCsvReader, LazyFileListReader, SortMultipleOptions};
use std::path::PathBuf;

pub struct CsvStore {
    data_dir: PathBuf,
    axis: DateAxis,
}

impl CsvStore {
    /// Store over `data_dir` using the default 1889-2015 historical axis.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_axis(data_dir, DateAxis::default_historical())
    }

    pub fn with_axis(data_dir: impl Into<PathBuf>, axis: DateAxis) -> Self {
        Self {
            data_dir: data_dir.into(),
            axis,
        }
    }

    fn load_variable(
        &self,
        variable: ClimateVariable,
        station: u32,
    ) -> Result<Vec<f64>, DataStoreError> {
        let path = self.data_dir.join(variable.file_name());
        debug!("Scanning {} for station {}", path.display(), station);

        let frame = LazyCsvReader::new(&path)
            .with_has_header(true)
            .finish()
            .map_err(|e| DataStoreError::FileScan(path.clone(), e))?
            .filter(col("station").eq(lit(station)))
            .sort(["date"], SortMultipleOptions::default())
            .collect()
            .map_err(|e| DataStoreError::FrameCollect {
                station,
                variable,
                source: e,
            })?;

        if frame.height() == 0 {
            return Err(DataStoreError::StationNotFound(station));
        }
        self.check_axis(&frame, variable)?;

        let values = frame
            .column("value")
            .and_then(|c| c.cast(&DataType::Float64))
            .map_err(|e| DataStoreError::Column {
                variable,
                column: "value",
                source: e,
            })?;
        let values = values.f64().map_err(|e| DataStoreError::Column {
            variable,
            column: "value",
            source: e,
        })?;

        Ok(values
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect())
    }

    /// The series must start at the axis epoch and carry one row per axis day.
    fn check_axis(&self, frame: &DataFrame, variable: ClimateVariable) -> Result<(), DataStoreError> {
        if frame.height() != self.axis.len() {
            return Err(DataStoreError::LengthMismatch {
                variable,
                expected: self.axis.len(),
                found: frame.height(),
            });
        }
        let dates = frame
            .column("date")
            .and_then(|c| c.str())
            .map_err(|e| DataStoreError::Column {
                variable,
                column: "date",
                source: e,
            })?;
        if let Some(first) = dates.get(0) {
            let first_date = NaiveDate::parse_from_str(first, "%Y-%m-%d").map_err(|_| {
                DataStoreError::DateParse {
                    variable,
                    value: first.to_string(),
                }
            })?;
            if first_date != self.axis.epoch() {
                return Err(DataStoreError::AxisMismatch {
                    variable,
                    expected: self.axis.epoch(),
                    found: first_date,
                });
            }
        }
        Ok(())
    }
}

impl DataStore for CsvStore {
    fn axis(&self) -> &DateAxis {
        &self.axis
    }

    fn load(&self, station: u32) -> Result<StationDailyData, DataStoreError> {
        info!(
            "Loading daily record for station {} from {}",
            station,
            self.data_dir.display()
        );
        let data = StationDailyData {
            axis: self.axis.clone(),
            minimum_temperature: self.load_variable(ClimateVariable::MinimumTemperature, station)?,
            maximum_temperature: self.load_variable(ClimateVariable::MaximumTemperature, station)?,
            precipitation: self.load_variable(ClimateVariable::Precipitation, station)?,
            windspeed: self.load_variable(ClimateVariable::Windspeed, station)?,
        };
        data.check_alignment()?;
        Ok(data)
    }
}
