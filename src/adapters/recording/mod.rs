//! Recording adapters that capture listings to cassettes.

pub mod directory;

pub use directory::RecordingDirectoryReader;

use crate::cassette::format::Outcome;
use crate::error::DirentError;

/// Converts an error into its recorded form.
///
/// Mirror of `replaying::replay_outcome`, which turns it back into an error.
pub(crate) fn failed(err: &DirentError) -> Outcome {
    Outcome::Failed { kind: err.kind(), message: err.detail() }
}
