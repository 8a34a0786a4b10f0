//! The data-store seam: anything that can produce a station's four aligned
//! daily series implements [`DataStore`].

use crate::data::error::DataStoreError;
use crate::types::series::{DateAxis, StationDailyData};
use std::collections::HashMap;

/// Supplies one station's complete daily record.
///
/// Implementations must return four series of identical length aligned to
/// [`DataStore::axis`]; the engine re-checks the lengths and treats any
/// mismatch as a data-integrity failure.
pub trait DataStore: Send + Sync {
    /// The shared historical date axis every loaded record is aligned to.
    fn axis(&self) -> &DateAxis;

    /// Loads a fresh snapshot of the station's record. Each query gets its
    /// own snapshot and discards it when the scan completes.
    fn load(&self, station: u32) -> Result<StationDailyData, DataStoreError>;
}

/// In-memory [`DataStore`] for tests and embedders that already hold the
/// arrays themselves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    axis: DateAxis,
    records: HashMap<u32, StationDailyData>,
}

impl MemoryStore {
    pub fn new(axis: DateAxis) -> Self {
        Self {
            axis,
            records: HashMap::new(),
        }
    }

    pub fn insert(&mut self, station: u32, data: StationDailyData) {
        self.records.insert(station, data);
    }
}

impl DataStore for MemoryStore {
    fn axis(&self) -> &DateAxis {
        &self.axis
    }

    fn load(&self, station: u32) -> Result<StationDailyData, DataStoreError> {
        self.records
            .get(&station)
            .cloned()
            .ok_or(DataStoreError::StationNotFound(station))
    }
}
