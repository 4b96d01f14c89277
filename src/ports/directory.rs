//! Directory reader port for single-level listings.

use std::ffi::OsString;
use std::path::Path;

use crate::dirent::Dirents;
use crate::error::Result;
use crate::lister::ScratchBuffer;

/// Lists the immediate children of a directory.
///
/// This is the leaf data source a recursive walker calls once per level.
/// Abstracting it lets a walker be driven from a recorded cassette instead
/// of the real disk.
pub trait DirectoryReader: Send + Sync {
    /// Lists `path` with a coarse type tag per entry, in unspecified order.
    ///
    /// # Errors
    ///
    /// Returns the listing error taxonomy; never a partial result.
    fn read_dirents(&self, path: &Path, scratch: Option<&mut ScratchBuffer>) -> Result<Dirents>;

    /// Lists only the names of the children of `path`, in unspecified order.
    ///
    /// # Errors
    ///
    /// Same as [`DirectoryReader::read_dirents`].
    fn read_dirnames(
        &self,
        path: &Path,
        scratch: Option<&mut ScratchBuffer>,
    ) -> Result<Vec<OsString>>;
}
