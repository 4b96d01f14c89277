//! Replaying adapters that serve recorded listings.

pub mod directory;

pub use directory::ReplayingDirectoryReader;

use std::path::Path;

use crate::cassette::format::Outcome;
use crate::error::{DirentError, Result};

/// Turns a recorded failure back into the error it was recorded from.
///
/// Mirror of `recording::failed`.
pub(crate) fn replay_outcome(outcome: Outcome, path: &Path) -> Result<Outcome> {
    match outcome {
        Outcome::Failed { kind, message } => Err(DirentError::from_parts(kind, path, &message)),
        other => Ok(other),
    }
}

/// Error for an outcome recorded under the wrong method.
pub(crate) fn mismatch(path: &Path, expected: &str, found: &Outcome) -> DirentError {
    let found = match found {
        Outcome::Entries { .. } => "entries",
        Outcome::Names { .. } => "names",
        Outcome::Failed { .. } => "failure",
    };
    DirentError::io(
        path,
        std::io::Error::other(format!("cassette holds {found} where {expected} were expected")),
    )
}
