//! Listing context selecting the active directory reader.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::LiveDirectoryReader;
use crate::adapters::recording::RecordingDirectoryReader;
use crate::adapters::replaying::ReplayingDirectoryReader;
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::config::Config;
use crate::ports::DirectoryReader;

/// Bundles the directory reader a command should use.
///
/// Constructors wire up the live, recording, or replaying adapter. A
/// recording context writes its cassette when finished or dropped.
pub struct ListingContext {
    /// Reader for directory listings.
    pub reader: Arc<dyn DirectoryReader>,
    /// Shared with the recording adapter, if any.
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ListingContext {
    /// Creates a context that reads the real filesystem.
    #[must_use]
    pub fn live() -> Self {
        Self { reader: Arc::new(LiveDirectoryReader), recorder: None }
    }

    /// Creates a context that reads the real filesystem and records every
    /// listing into a cassette at `path`.
    #[must_use]
    pub fn recording(path: &Path) -> Self {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(path, "dirents-session")));
        let reader =
            RecordingDirectoryReader::new(Box::new(LiveDirectoryReader), Arc::clone(&recorder));
        Self { reader: Arc::new(reader), recorder: Some(recorder) }
    }

    /// Creates a context serving listings from the cassette at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        let reader = ReplayingDirectoryReader::new(CassetteReplayer::new(&cassette));
        Ok(Self { reader: Arc::new(reader), recorder: None })
    }

    /// Creates the context requested by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if a replay cassette cannot be loaded.
    pub fn from_config(config: &Config) -> Result<Self, String> {
        match (&config.record, &config.replay) {
            (Some(path), _) => Ok(Self::recording(path)),
            (None, Some(path)) => Self::replaying(path),
            (None, None) => Ok(Self::live()),
        }
    }

    /// Writes the cassette of a recording context.
    ///
    /// Returns the cassette path, or `None` when nothing is being recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be written.
    pub fn finish(mut self) -> Result<Option<PathBuf>, String> {
        self.save_recording()
    }

    fn save_recording(&mut self) -> Result<Option<PathBuf>, String> {
        let Some(recorder) = self.recorder.take() else {
            return Ok(None);
        };
        let guard = recorder.lock().map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        guard.save().map(Some).map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl Drop for ListingContext {
    fn drop(&mut self) {
        if let Err(e) = self.save_recording() {
            tracing::warn!("{e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_then_replaying_serves_same_listing() {
        let fixture = tempfile::tempdir().unwrap();
        std::fs::create_dir(fixture.path().join("dir1")).unwrap();
        std::fs::write(fixture.path().join("file3"), "").unwrap();
        let cassette = fixture.path().join("out").join("session.yaml");

        let ctx = ListingContext::recording(&cassette);
        let mut recorded = ctx.reader.read_dirents(fixture.path(), None).unwrap();
        assert_eq!(ctx.finish().unwrap(), Some(cassette.clone()));

        let ctx = ListingContext::replaying(&cassette).unwrap();
        let mut replayed = ctx.reader.read_dirents(fixture.path(), None).unwrap();
        recorded.sort_by_name();
        replayed.sort_by_name();
        assert_eq!(recorded, replayed);
    }

    #[test]
    fn dropping_a_recording_context_writes_the_cassette() {
        let dir = tempfile::tempdir().unwrap();
        let cassette = dir.path().join("dropped.yaml");
        {
            let ctx = ListingContext::recording(&cassette);
            let _ = ctx.reader.read_dirnames(dir.path(), None);
        }
        assert_eq!(Cassette::load(&cassette).unwrap().interactions.len(), 1);
    }

    #[test]
    fn live_context_has_nothing_to_finish() {
        assert_eq!(ListingContext::live().finish().unwrap(), None);
    }

    #[test]
    fn from_config_rejects_missing_replay_file() {
        let config =
            Config { replay: Some(PathBuf::from("/no/such/cassette.yaml")), ..Config::default() };
        let err = ListingContext::from_config(&config).err().unwrap();
        assert!(err.contains("Failed to read cassette file"));
    }
}
