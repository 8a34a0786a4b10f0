//! Query execution off the caller's task.
//!
//! The scan is a CPU-bound, non-suspending pass over arrays already in
//! memory, so it runs on a blocking worker. Completion is delivered exactly
//! once through a single-slot channel wrapped in [`QueryHandle`]; the caller
//! awaits it or polls it without blocking. Nothing mutable is shared across
//! the boundary: the worker owns its spec and its data snapshot.

use crate::data::DataStore;
use crate::engine::error::QueryError;
use crate::engine::{masks, scan};
use crate::types::event::Event;
use crate::types::query::QuerySpec;
use log::{info, warn};
use std::sync::Arc;
use tokio::sync::oneshot;

/// Handle to one in-flight query. Consume it with [`QueryHandle::wait`] or
/// check it periodically with [`QueryHandle::poll`].
pub struct QueryHandle {
    rx: oneshot::Receiver<Result<Vec<Event>, QueryError>>,
}

impl QueryHandle {
    /// Waits for the query to finish and returns its outcome.
    pub async fn wait(self) -> Result<Vec<Event>, QueryError> {
        match self.rx.await {
            Ok(result) => result,
            Err(_) => Err(QueryError::Unclassified(
                "result channel closed before delivery".to_string(),
            )),
        }
    }

    /// Non-blocking check for completion. Returns `None` while the scan is
    /// still running; once it returns `Some`, subsequent calls report the
    /// channel as closed.
    pub fn poll(&mut self) -> Option<Result<Vec<Event>, QueryError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(QueryError::Unclassified(
                "result channel closed before delivery".to_string(),
            ))),
        }
    }
}

/// Runs one query synchronously: validate, load a snapshot, build the scan
/// signals, scan. All-or-nothing; any error means no events at all.
pub fn run_query(spec: &QuerySpec, store: &dyn DataStore) -> Result<Vec<Event>, QueryError> {
    spec.validate()?;
    let data = store.load(spec.station)?;
    data.check_alignment()?;
    let signals = masks::build_signals(spec, &data)?;
    let events = scan::scan(&data.axis, &signals, spec.window())?;
    info!(
        "Query for station {} matched {} events",
        spec.station,
        events.len()
    );
    Ok(events)
}

/// Submits a query to a blocking worker and returns a handle to its result.
///
/// Must be called from within a tokio runtime. A panicking worker is reported
/// as [`QueryError::Unclassified`] through the handle rather than crashing
/// anything.
pub fn submit(spec: QuerySpec, store: Arc<dyn DataStore>) -> QueryHandle {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let outcome = tokio::task::spawn_blocking(move || run_query(&spec, store.as_ref())).await;
        let result = match outcome {
            Ok(result) => result,
            Err(join_error) => {
                warn!("Query worker did not complete: {join_error}");
                Err(QueryError::Unclassified(join_error.to_string()))
            }
        };
        // The receiver may have been dropped; nothing to do then.
        let _ = tx.send(result);
    });
    QueryHandle { rx }
}
