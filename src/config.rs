//! Environment-driven configuration.

use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;

/// Record every listing to this cassette file.
pub const RECORD_VAR: &str = "DIRENTS_RECORD";
/// Serve listings from this cassette file instead of the disk.
pub const REPLAY_VAR: &str = "DIRENTS_REPLAY";
/// Default output format (`text`, `json`, or `yaml`).
pub const FORMAT_VAR: &str = "DIRENTS_FORMAT";

/// How command output is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned, human-readable columns.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
            .map_err(|_| format!("unknown output format {s:?} (expected text, json, or yaml)"))
    }
}

/// Settings read from the environment (and `.env`, loaded by `main`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Cassette to record into, from `DIRENTS_RECORD`.
    pub record: Option<PathBuf>,
    /// Cassette to replay from, from `DIRENTS_REPLAY`.
    pub replay: Option<PathBuf>,
    /// Default output format, from `DIRENTS_FORMAT`.
    pub format: OutputFormat,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`Config::from_lookup`].
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`. Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if both record and replay are requested, or if the
    /// format is not recognised.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let record = get(RECORD_VAR).map(PathBuf::from);
        let replay = get(REPLAY_VAR).map(PathBuf::from);
        if record.is_some() && replay.is_some() {
            return Err(format!("{RECORD_VAR} and {REPLAY_VAR} cannot both be set"));
        }
        let format = get(FORMAT_VAR)
            .map(|v| v.trim().parse::<OutputFormat>())
            .transpose()
            .map_err(|e| format!("{FORMAT_VAR}: {e}"))?
            .unwrap_or_default();

        Ok(Self { record, replay, format })
    }
}
