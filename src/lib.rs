//! Search long daily climate records for runs of extreme weather.
//!
//! Given one station's historical record (minimum/maximum temperature,
//! precipitation and windspeed, one sample per day on a shared date axis),
//! a query finds every contiguous date range on which a chosen combination
//! of threshold conditions holds for at least a minimum number of
//! consecutive days. Temperature and wind are judged per day; precipitation
//! is summed over a trailing window of that same length before its threshold
//! applies, and a month selection can restrict the search to part of the
//! year.
//!
//! The usual entry point is [`Heatwave`], which owns the station list and a
//! [`DataStore`] and submits queries to a blocking worker. The synchronous
//! [`run_query`] is available for callers without a tokio runtime.

mod client;
mod data;
mod engine;
mod error;
mod stations;
mod types;

pub use client::Heatwave;
pub use error::HeatwaveError;

pub use data::error::DataStoreError;
pub use data::{CsvStore, DataStore, MemoryStore};

pub use engine::error::QueryError;
pub use engine::{run_query, submit, QueryHandle};

pub use stations::error::StationListError;
pub use stations::{Station, StationList};

pub use types::condition::ThresholdCondition;
pub use types::event::Event;
pub use types::query::{InvalidQuerySpec, MonthSelection, QuerySpec};
pub use types::series::{ClimateVariable, DateAxis, StationDailyData};
