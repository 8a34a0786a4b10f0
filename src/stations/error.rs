use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StationListError {
    #[error("Failed to read station list '{0}'")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Station list '{0}' contains no stations")]
    Empty(PathBuf),
}
