//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::OutputFormat;

/// Top-level CLI parser for `dirents`.
#[derive(Debug, Parser)]
#[command(name = "dirents", version, about = "List directory entries with their file types")]
pub struct Cli {
    /// Output format; overrides `DIRENTS_FORMAT`.
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every listing command.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Directory to list.
    pub path: PathBuf,
    /// Sort by name (byte order) instead of the order the OS returned.
    #[arg(long)]
    pub sort: bool,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List entries with their file types.
    List {
        /// Directory and ordering options.
        #[command(flatten)]
        args: ListArgs,
        /// Give up if the listing takes longer than this many milliseconds.
        #[arg(long, value_name = "MS")]
        timeout_ms: Option<u64>,
    },
    /// List entry names only.
    Names {
        /// Directory and ordering options.
        #[command(flatten)]
        args: ListArgs,
    },
}
