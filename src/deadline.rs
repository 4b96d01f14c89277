//! Runs a listing on a blocking worker with a deadline.
//!
//! Listing itself is synchronous and has no cancellation hook. Callers that
//! need a bound on how long they wait run it here: the listing moves to
//! tokio's blocking pool and the caller stops waiting once the deadline
//! passes. A timed-out listing still runs to completion in the background
//! and its result is discarded.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::dirent::Dirents;
use crate::error::DirentError;
use crate::ports::DirectoryReader;

/// Failure of a deadline-bounded listing.
#[derive(Debug, Error)]
pub enum DeadlineError {
    /// The listing did not finish in time.
    #[error("listing {} did not finish within {timeout:?}", .path.display())]
    TimedOut {
        /// Directory being listed.
        path: PathBuf,
        /// The deadline that passed.
        timeout: Duration,
    },
    /// The listing finished with an error.
    #[error(transparent)]
    Listing(#[from] DirentError),
    /// The worker running the listing panicked or was cancelled.
    #[error("listing worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Lists `path` with `reader`, giving up after `timeout`.
///
/// # Errors
///
/// Returns [`DeadlineError::TimedOut`] when the deadline passes first, or the
/// listing's own error otherwise.
pub async fn read_dirents_within(
    reader: Arc<dyn DirectoryReader>,
    path: PathBuf,
    timeout: Duration,
) -> Result<Dirents, DeadlineError> {
    let task_path = path.clone();
    let task = tokio::task::spawn_blocking(move || reader.read_dirents(&task_path, None));
    match tokio::time::timeout(timeout, task).await {
        Ok(joined) => Ok(joined??),
        Err(_) => {
            tracing::debug!(dir = %path.display(), ?timeout, "listing timed out");
            Err(DeadlineError::TimedOut { path, timeout })
        }
    }
}

/// Blocking form of [`read_dirents_within`] for synchronous callers.
///
/// # Errors
///
/// Same as [`read_dirents_within`], plus a worker error if the runtime cannot
/// be started.
pub fn block_on_within(
    reader: Arc<dyn DirectoryReader>,
    path: PathBuf,
    timeout: Duration,
) -> Result<Dirents, DeadlineError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(|e| DeadlineError::Listing(DirentError::io(&path, e)))?;
    let result = runtime.block_on(read_dirents_within(reader, path, timeout));
    // Do not wait for a timed-out listing still running on the blocking pool.
    runtime.shutdown_background();
    result
}
