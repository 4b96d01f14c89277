//! Error taxonomy for directory listing.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for listing operations.
pub type Result<T> = std::result::Result<T, DirentError>;

/// Errors surfaced by entry construction and directory listing.
///
/// Every variant is a recoverable return value. Listing never retries and
/// never returns partial results alongside an error.
#[derive(Debug, Error)]
pub enum DirentError {
    /// A `Dirent` was constructed from a malformed name.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The directory path does not exist.
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The path exists but is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    /// The directory (or one of its entries) could not be accessed.
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),
    /// Any other failure while opening, enumerating, or classifying.
    #[error("io error reading {}: {source}", .path.display())]
    Io {
        /// Directory being listed when the failure happened.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
}

/// Serializable discriminant of [`DirentError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// See [`DirentError::InvalidArgument`].
    InvalidArgument,
    /// See [`DirentError::NotFound`].
    NotFound,
    /// See [`DirentError::NotADirectory`].
    NotADirectory,
    /// See [`DirentError::PermissionDenied`].
    PermissionDenied,
    /// See [`DirentError::Io`].
    Io,
}

impl DirentError {
    /// Maps a failure to open `path` for reading onto the taxonomy.
    ///
    /// Platforms disagree on the error returned when a regular file is opened
    /// as a directory, so anything unrecognised is double-checked against the
    /// path's metadata before being reported as a plain I/O error.
    pub(crate) fn from_open(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::NotADirectory => Self::NotADirectory(path.to_path_buf()),
            _ => match std::fs::metadata(path) {
                Ok(meta) if !meta.is_dir() => Self::NotADirectory(path.to_path_buf()),
                _ => Self::io(path, err),
            },
        }
    }

    /// Wraps a failure that happened after the directory was opened.
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io { path: path.to_path_buf(), source }
    }

    /// Returns the serializable kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::NotADirectory(_) => ErrorKind::NotADirectory,
            Self::PermissionDenied(_) => ErrorKind::PermissionDenied,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    /// The part of the error not captured by its kind and path.
    ///
    /// Together with [`DirentError::kind`] this is what [`DirentError::from_parts`]
    /// needs to rebuild an equivalent error.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::InvalidArgument(msg) => msg.clone(),
            Self::Io { source, .. } => source.to_string(),
            other => other.to_string(),
        }
    }

    /// Rebuilds an error from a recorded kind, path, and detail message.
    #[must_use]
    pub fn from_parts(kind: ErrorKind, path: &Path, message: &str) -> Self {
        match kind {
            ErrorKind::InvalidArgument => Self::InvalidArgument(message.to_string()),
            ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            ErrorKind::NotADirectory => Self::NotADirectory(path.to_path_buf()),
            ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            ErrorKind::Io => Self::io(path, io::Error::other(message.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_error_kinds_map_to_taxonomy() {
        let path = Path::new("/nowhere/at/all");
        let err = DirentError::from_open(path, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, DirentError::NotFound(ref p) if p == path));

        let err = DirentError::from_open(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    }

    #[test]
    fn unrecognised_open_error_on_file_is_not_a_directory() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = DirentError::from_open(file.path(), io::Error::other("ENOTDIR"));
        assert_eq!(err.kind(), ErrorKind::NotADirectory);
    }

    #[test]
    fn from_parts_preserves_kind_and_message() {
        let err = DirentError::from_parts(ErrorKind::Io, Path::new("/x"), "disk on fire");
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("disk on fire"));

        let err = DirentError::from_parts(ErrorKind::NotFound, Path::new("/x"), "ignored");
        assert_eq!(err.to_string(), "not found: /x");
    }

    #[test]
    fn detail_round_trips_through_from_parts() {
        let original = DirentError::io(Path::new("/d"), io::Error::other("bad sector"));
        let rebuilt = DirentError::from_parts(original.kind(), Path::new("/d"), &original.detail());
        assert_eq!(rebuilt.to_string(), original.to_string());

        let original = DirentError::InvalidArgument("entry name is empty".into());
        let rebuilt = DirentError::from_parts(original.kind(), Path::new("/d"), &original.detail());
        assert_eq!(rebuilt.to_string(), original.to_string());
    }

    #[test]
    fn error_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::NotADirectory).unwrap();
        assert_eq!(json, "\"not_a_directory\"");
    }
}
