//! The fixed set of selectable stations.
//!
//! The list is loaded once at startup from a flat text file (one station name
//! per line; the line number is the station id) and is read-only afterwards.

use crate::stations::error::StationListError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One selectable station: a stable numeric id and a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: u32,
    pub name: String,
}

/// Immutable, ordered list of stations. Station ids are indices into this list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationList {
    stations: Vec<Station>,
}

impl StationList {
    /// Reads a station list from a flat file, one name per line.
    /// Blank lines (including a trailing newline) are skipped.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StationListError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| StationListError::Io(path.to_path_buf(), e))?;
        let list = Self::from_names(contents.lines().map(str::trim).filter(|l| !l.is_empty()));
        if list.is_empty() {
            return Err(StationListError::Empty(path.to_path_buf()));
        }
        log::info!("Loaded {} stations from {}", list.len(), path.display());
        Ok(list)
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stations = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Station {
                id: i as u32,
                name: name.into(),
            })
            .collect();
        Self { stations }
    }

    pub fn get(&self, id: u32) -> Option<&Station> {
        self.stations.get(id as usize)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }
}
