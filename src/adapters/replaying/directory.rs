//! Replaying adapter for the `DirectoryReader` port.

use std::ffi::OsString;
use std::path::Path;
use std::sync::Mutex;

use crate::cassette::format::{Method, Outcome};
use crate::cassette::replayer::CassetteReplayer;
use crate::dirent::Dirents;
use crate::error::{DirentError, Result};
use crate::lister::ScratchBuffer;
use crate::ports::directory::DirectoryReader;

/// Serves listings from a recorded cassette instead of the disk.
pub struct ReplayingDirectoryReader {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingDirectoryReader {
    /// Creates a replaying reader from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn next_outcome(&self, method: Method, path: &Path) -> Result<Outcome> {
        let mut replayer = self
            .replayer
            .lock()
            .map_err(|_| DirentError::io(path, std::io::Error::other("replayer lock poisoned")))?;
        replayer
            .next_interaction(method, path)
            .map(|interaction| interaction.outcome.clone())
            .map_err(|msg| DirentError::io(path, std::io::Error::other(msg)))
    }
}

impl DirectoryReader for ReplayingDirectoryReader {
    fn read_dirents(&self, path: &Path, _scratch: Option<&mut ScratchBuffer>) -> Result<Dirents> {
        match super::replay_outcome(self.next_outcome(Method::ReadDirents, path)?, path)? {
            Outcome::Entries { entries } => Ok(Dirents::from(entries)),
            other => Err(super::mismatch(path, "entries", &other)),
        }
    }

    fn read_dirnames(
        &self,
        path: &Path,
        _scratch: Option<&mut ScratchBuffer>,
    ) -> Result<Vec<OsString>> {
        match super::replay_outcome(self.next_outcome(Method::ReadDirnames, path)?, path)? {
            Outcome::Names { names } => Ok(names),
            other => Err(super::mismatch(path, "names", &other)),
        }
    }
}
