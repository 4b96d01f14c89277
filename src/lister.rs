//! Reads a single directory level into [`Dirents`] or bare names.
//!
//! The type of each entry comes from [`fs::DirEntry::file_type`]. Where the
//! platform reports a type in the directory read (`d_type` on Linux and the
//! BSDs, find-data attributes on Windows) that costs no metadata call. When
//! it reports none (`DT_UNKNOWN`, some network and FUSE filesystems), std
//! issues one `lstat` for that entry alone, so links are never followed. The
//! lister does not query again when that fails; the listing fails with `Io`.

use std::ffi::OsString;
use std::fs;
use std::path::Path;

use crate::dirent::{Dirent, Dirents, FileKind};
use crate::error::{DirentError, Result};

/// Reusable per-call working memory.
///
/// Passing the same buffer to successive calls (for example, one per level of
/// a recursive walk) lets the lister presize result vectors from the previous
/// listing. The buffer has no effect on results. Taking it by `&mut` means one
/// buffer serves one in-flight call at a time.
#[derive(Debug, Default)]
pub struct ScratchBuffer {
    capacity_hint: usize,
}

impl ScratchBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer presized for directories of about `entries` children.
    #[must_use]
    pub fn with_capacity(entries: usize) -> Self {
        Self { capacity_hint: entries }
    }
}

/// Lists `path`, returning each child with its coarse type.
///
/// Entries come back in whatever order the OS produced them; call
/// [`Dirents::sort_by_name`] when determinism matters. `.` and `..` are never
/// included.
///
/// # Errors
///
/// - [`DirentError::NotFound`] if `path` does not exist.
/// - [`DirentError::NotADirectory`] if `path` is not a directory.
/// - [`DirentError::PermissionDenied`] if it cannot be opened.
/// - [`DirentError::Io`] for any failure after opening. Entries read so far
///   are discarded.
pub fn read_dirents(
    path: impl AsRef<Path>,
    scratch: Option<&mut ScratchBuffer>,
) -> Result<Dirents> {
    let path = path.as_ref();
    let reader = fs::read_dir(path).map_err(|e| DirentError::from_open(path, e))?;
    let mut entries = Vec::with_capacity(scratch.as_ref().map_or(0, |s| s.capacity_hint));
    for entry in reader {
        let entry = entry.map_err(|e| DirentError::io(path, e))?;
        let file_type = entry.file_type().map_err(|e| {
            tracing::trace!(
                dir = %path.display(),
                name = ?entry.file_name(),
                error = %e,
                "entry type unavailable"
            );
            DirentError::io(path, e)
        })?;
        entries.push(Dirent::from_os(entry.file_name(), FileKind::from(file_type)));
    }

    if let Some(scratch) = scratch {
        scratch.capacity_hint = entries.len();
    }
    tracing::debug!(dir = %path.display(), count = entries.len(), "read dirents");
    Ok(Dirents::from(entries))
}

/// Lists the names of the children of `path`, skipping type classification.
///
/// # Errors
///
/// Same as [`read_dirents`].
pub fn read_dirnames(
    path: impl AsRef<Path>,
    scratch: Option<&mut ScratchBuffer>,
) -> Result<Vec<OsString>> {
    let path = path.as_ref();
    let reader = fs::read_dir(path).map_err(|e| DirentError::from_open(path, e))?;
    let mut names = Vec::with_capacity(scratch.as_ref().map_or(0, |s| s.capacity_hint));
    for entry in reader {
        names.push(entry.map_err(|e| DirentError::io(path, e))?.file_name());
    }

    if let Some(scratch) = scratch {
        scratch.capacity_hint = names.len();
    }
    tracing::debug!(dir = %path.display(), count = names.len(), "read dirnames");
    Ok(names)
}
