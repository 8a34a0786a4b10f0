//! The main entry point: a client owning the immutable station list and a
//! data store, from which queries are submitted.

use crate::data::{CsvStore, DataStore};
use crate::engine::error::QueryError;
use crate::engine::{submit, QueryHandle};
use crate::error::HeatwaveError;
use crate::stations::StationList;
use crate::types::condition::ThresholdCondition;
use crate::types::event::Event;
use crate::types::query::{MonthSelection, QuerySpec};
use bon::bon;
use chrono::Datelike;
use std::path::Path;
use std::sync::Arc;

const STATION_LIST_FILE: &str = "locations.txt";

/// Client for searching a station's historical record for extreme-weather
/// events.
///
/// Holds the process-wide station list (loaded once, read-only afterwards)
/// and a [`DataStore`] supplying per-station daily series. Each submitted
/// query loads its own data snapshot and runs on a blocking worker; the
/// returned [`QueryHandle`] delivers the result exactly once.
///
/// # Examples
///
/// ```
/// use heatwave::{
///     DateAxis, Heatwave, MemoryStore, StationDailyData, StationList, ThresholdCondition,
/// };
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), heatwave::HeatwaveError> {
/// let axis = DateAxis::new(chrono::NaiveDate::from_ymd_opt(2001, 7, 1).unwrap(), 5);
/// let mut store = MemoryStore::new(axis.clone());
/// store.insert(
///     0,
///     StationDailyData {
///         axis,
///         minimum_temperature: vec![18.0; 5],
///         maximum_temperature: vec![41.0, 42.0, 43.0, 30.0, 41.0],
///         precipitation: vec![0.0; 5],
///         windspeed: vec![10.0; 5],
///     },
/// );
/// let client = Heatwave::new(StationList::from_names(["Adelaide"]), Arc::new(store));
///
/// let handle = client
///     .query()
///     .station(0)
///     .consecutive_days(2)
///     .temperature(ThresholdCondition::HigherThan(40.0))
///     .call()?;
/// let events = handle.wait().await?;
/// assert_eq!(events.len(), 1);
/// assert_eq!(events[0].days(), 3);
/// # Ok(())
/// # }
/// ```
pub struct Heatwave {
    stations: StationList,
    store: Arc<dyn DataStore>,
}

#[bon]
impl Heatwave {
    pub fn new(stations: StationList, store: Arc<dyn DataStore>) -> Self {
        Self { stations, store }
    }

    /// Opens a data directory laid out as the reference data set: a
    /// `locations.txt` station list next to one CSV file per climate
    /// variable.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self, HeatwaveError> {
        let data_dir = data_dir.as_ref();
        let stations = StationList::from_file(data_dir.join(STATION_LIST_FILE))?;
        Ok(Self::new(stations, Arc::new(CsvStore::new(data_dir))))
    }

    /// The selectable stations, in id order.
    pub fn stations(&self) -> &StationList {
        &self.stations
    }

    /// Submits a query for one station.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.station(u32)`: **Required.** Id of the station to search.
    /// * `.consecutive_days(u32)`: Optional, default `1`. Minimum run length;
    ///   also the precipitation accumulation window.
    /// * `.temperature(ThresholdCondition)`: Optional, default `Any`.
    /// * `.precipitation(ThresholdCondition)`: Optional, default `Any`.
    /// * `.wind(ThresholdCondition)`: Optional, default `Any`.
    /// * `.months(MonthSelection)`: Optional, default all months.
    ///
    /// At least one condition must not be `Any`; the query is validated here,
    /// before any worker is spawned, and again defensively by the engine.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidQuery`] for a malformed specification.
    /// Failures during the scan itself (data store errors, resource
    /// exhaustion, worker panics) are delivered through the handle.
    #[builder]
    pub fn query(
        &self,
        station: u32,
        #[builder(default = 1)] consecutive_days: u32,
        #[builder(default)] temperature: ThresholdCondition,
        #[builder(default)] precipitation: ThresholdCondition,
        #[builder(default)] wind: ThresholdCondition,
        #[builder(default)] months: MonthSelection,
    ) -> Result<QueryHandle, QueryError> {
        let spec = QuerySpec {
            station,
            consecutive_days,
            temperature,
            precipitation,
            wind,
            months,
        };
        spec.validate()?;
        Ok(submit(spec, Arc::clone(&self.store)))
    }

    /// One-line summary of a result set over the store's historical span.
    pub fn summary(&self, events: &[Event]) -> String {
        let axis = self.store.axis();
        let first = axis.epoch().year();
        let last = axis.last().map(|d| d.year()).unwrap_or(first);
        format!(
            "The specified conditions have occurred {} times over {} years ({}-{})",
            events.len(),
            axis.span_years(),
            first,
            last
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MemoryStore;
    use crate::types::query::InvalidQuerySpec;
    use crate::types::series::{DateAxis, StationDailyData};
    use chrono::NaiveDate;

    fn client() -> Heatwave {
        let axis = DateAxis::new(NaiveDate::from_ymd_opt(1889, 1, 1).unwrap(), 8);
        let mut store = MemoryStore::new(axis.clone());
        store.insert(
            0,
            StationDailyData {
                axis,
                minimum_temperature: vec![2.0, 1.0, -1.0, -2.0, -1.5, 3.0, -4.0, -5.0],
                maximum_temperature: vec![12.0; 8],
                precipitation: vec![0.0, 0.0, 6.0, 6.0, 0.0, 0.0, 0.0, 0.0],
                windspeed: vec![30.0; 8],
            },
        );
        Heatwave::new(StationList::from_names(["Adelaide", "Broome"]), Arc::new(store))
    }

    #[tokio::test]
    async fn cold_snap_query_end_to_end() {
        let client = client();
        let handle = client
            .query()
            .station(0)
            .consecutive_days(3)
            .temperature(ThresholdCondition::LowerThan(0.0))
            .call()
            .unwrap();
        let events = handle.wait().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start, NaiveDate::from_ymd_opt(1889, 1, 3).unwrap());
        assert_eq!(events[0].end, NaiveDate::from_ymd_opt(1889, 1, 5).unwrap());
    }

    #[tokio::test]
    async fn accumulated_precipitation_query_end_to_end() {
        let client = client();
        let handle = client
            .query()
            .station(0)
            .consecutive_days(2)
            .precipitation(ThresholdCondition::HigherThan(10.0))
            .call()
            .unwrap();
        let events = handle.wait().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start, NaiveDate::from_ymd_opt(1889, 1, 3).unwrap());
        assert_eq!(events[0].end, NaiveDate::from_ymd_opt(1889, 1, 4).unwrap());
    }

    #[test]
    fn all_any_query_is_rejected_at_submission() {
        let client = client();
        match client.query().station(0).call() {
            Err(QueryError::InvalidQuery(InvalidQuerySpec::NoActiveConditions)) => {}
            other => panic!("expected configuration error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn summary_reports_count_and_span() {
        let client = client();
        let handle = client
            .query()
            .station(0)
            .wind(ThresholdCondition::HigherThan(25.0))
            .call()
            .unwrap();
        let events = handle.wait().await.unwrap();
        assert_eq!(
            client.summary(&events),
            "The specified conditions have occurred 1 times over 0 years (1889-1889)"
        );
    }

    #[test]
    fn station_list_is_exposed() {
        let client = client();
        assert_eq!(client.stations().len(), 2);
        assert_eq!(client.stations().get(1).unwrap().name, "Broome");
    }
}
