//! Cassette data structures for recorded directory listings.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dirent::Dirent;
use crate::error::ErrorKind;

/// Which listing call an interaction captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// `read_dirents`.
    ReadDirents,
    /// `read_dirnames`.
    ReadDirnames,
}

/// What a recorded call returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// A successful `read_dirents`.
    Entries {
        /// Entries in the order the OS produced them.
        entries: Vec<Dirent>,
    },
    /// A successful `read_dirnames`.
    Names {
        /// Names in the order the OS produced them.
        #[serde(with = "crate::dirent::os_name::many")]
        names: Vec<OsString>,
    },
    /// The call failed.
    Failed {
        /// Error category.
        kind: ErrorKind,
        /// Error detail beyond kind and path; see `DirentError::detail`.
        message: String,
    },
}

/// A single recorded listing call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Method invoked.
    pub method: Method,
    /// Directory that was listed, as given by the caller.
    pub path: PathBuf,
    /// Result of the call.
    pub outcome: Outcome,
}

/// A cassette containing a sequence of recorded listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Reads and parses a YAML cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))
    }
}
