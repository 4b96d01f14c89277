//! Directory entry enumeration with cheap file-type classification.
//!
//! [`read_dirents`] lists one directory level, tagging each child as a
//! directory, regular file, symlink, or other, using the type the OS reports
//! alongside each entry rather than a metadata call per entry.
//! [`read_dirnames`] returns just the names. Both accept an optional
//! [`ScratchBuffer`] that callers making many calls can reuse.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod deadline;
pub mod dirent;
pub mod error;
pub mod lister;
pub mod ports;

pub use dirent::{Dirent, Dirents, FileKind};
pub use error::{DirentError, ErrorKind, Result};
pub use lister::{read_dirents, read_dirnames, ScratchBuffer};

use clap::error::ErrorKind as ClapErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> std::result::Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err)
            if matches!(err.kind(), ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion) =>
        {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli)
}
