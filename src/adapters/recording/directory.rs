//! Recording adapter for the `DirectoryReader` port.

use std::ffi::OsString;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::cassette::format::{Method, Outcome};
use crate::cassette::recorder::CassetteRecorder;
use crate::dirent::Dirents;
use crate::error::Result;
use crate::lister::ScratchBuffer;
use crate::ports::DirectoryReader;

/// Records listings while delegating to an inner reader.
pub struct RecordingDirectoryReader {
    inner: Box<dyn DirectoryReader>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingDirectoryReader {
    /// Creates a recording reader wrapping the given implementation.
    pub fn new(inner: Box<dyn DirectoryReader>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }

    fn record(&self, method: Method, path: &Path, outcome: Outcome) {
        match self.recorder.lock() {
            Ok(mut guard) => guard.record(method, path, outcome),
            Err(_) => {
                tracing::warn!(
                    path = %path.display(),
                    "recorder lock poisoned; dropping interaction"
                );
            }
        }
    }
}

impl DirectoryReader for RecordingDirectoryReader {
    fn read_dirents(&self, path: &Path, scratch: Option<&mut ScratchBuffer>) -> Result<Dirents> {
        let result = self.inner.read_dirents(path, scratch);
        let outcome = match &result {
            Ok(entries) => Outcome::Entries { entries: entries.to_vec() },
            Err(err) => super::failed(err),
        };
        self.record(Method::ReadDirents, path, outcome);
        result
    }

    fn read_dirnames(
        &self,
        path: &Path,
        scratch: Option<&mut ScratchBuffer>,
    ) -> Result<Vec<OsString>> {
        let result = self.inner.read_dirnames(path, scratch);
        let outcome = match &result {
            Ok(names) => Outcome::Names { names: names.clone() },
            Err(err) => super::failed(err),
        };
        self.record(Method::ReadDirnames, path, outcome);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::LiveDirectoryReader;
    use crate::cassette::format::Cassette;
    use crate::error::ErrorKind;

    #[test]
    fn records_successes_and_failures() {
        let fixture = tempfile::tempdir().unwrap();
        std::fs::write(fixture.path().join("file3"), "").unwrap();
        let cassette_path = fixture.path().join("dir.cassette.yaml");
        let missing = fixture.path().join("missing");

        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&cassette_path, "test")));
        let reader =
            RecordingDirectoryReader::new(Box::new(LiveDirectoryReader), Arc::clone(&recorder));
        reader.read_dirents(fixture.path(), None).unwrap();
        assert!(reader.read_dirnames(&missing, None).is_err());

        recorder.lock().unwrap().save().unwrap();

        let cassette = Cassette::load(&cassette_path).unwrap();
        assert_eq!(cassette.interactions.len(), 2);
        assert!(matches!(
            &cassette.interactions[0].outcome,
            Outcome::Entries { entries } if entries.len() == 1 && entries[0].is_regular()
        ));
        assert!(matches!(
            cassette.interactions[1].outcome,
            Outcome::Failed { kind: ErrorKind::NotFound, .. }
        ));
    }
}
