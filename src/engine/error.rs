use crate::data::error::DataStoreError;
use crate::types::query::InvalidQuerySpec;
use thiserror::Error;

/// Everything that can go wrong while answering a query.
///
/// A query is all-or-nothing: whichever variant is reported, no partial event
/// list accompanies it.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The query specification itself is malformed. Callers validate before
    /// submitting; the engine rejects violations defensively as well.
    #[error("invalid query: {0}")]
    InvalidQuery(#[from] InvalidQuerySpec),

    /// The data store failed to produce an aligned record.
    #[error(transparent)]
    Data(#[from] DataStoreError),

    /// Allocating the scan buffers failed. Reported distinctly so callers can
    /// present a specific diagnosis.
    #[error("ran out of memory while preparing scan buffers")]
    OutOfMemory,

    /// An unexpected failure inside the query worker, reported instead of
    /// crashing it.
    #[error("query worker failed: {0}")]
    Unclassified(String),
}
