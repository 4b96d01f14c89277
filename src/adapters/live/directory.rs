//! Live directory reader backed by the OS.

use std::ffi::OsString;
use std::path::Path;

use crate::dirent::Dirents;
use crate::error::Result;
use crate::lister::{self, ScratchBuffer};
use crate::ports::directory::DirectoryReader;

/// Reads directories from the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveDirectoryReader;

impl DirectoryReader for LiveDirectoryReader {
    fn read_dirents(&self, path: &Path, scratch: Option<&mut ScratchBuffer>) -> Result<Dirents> {
        lister::read_dirents(path, scratch)
    }

    fn read_dirnames(
        &self,
        path: &Path,
        scratch: Option<&mut ScratchBuffer>,
    ) -> Result<Vec<OsString>> {
        lister::read_dirnames(path, scratch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_entries() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("d")).unwrap();
        std::fs::write(dir.path().join("f"), "").unwrap();

        let reader = LiveDirectoryReader;
        let mut from_entries = reader.read_dirents(dir.path(), None).unwrap().names();
        let mut names = reader.read_dirnames(dir.path(), None).unwrap();
        from_entries.sort();
        names.sort();
        assert_eq!(from_entries, names);
    }
}
