//! Command dispatch and handlers.

pub mod list;
pub mod names;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::context::ListingContext;

/// Dispatch a parsed command to its handler.
///
/// When `DIRENTS_RECORD` is set to a file path, every listing is recorded to
/// that cassette; when `DIRENTS_REPLAY` is set, listings come from it.
///
/// # Errors
///
/// Returns an error string if configuration is invalid or the command fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let config = Config::from_env()?;
    let format = cli.format.unwrap_or(config.format);
    let ctx = ListingContext::from_config(&config)?;

    let result = match &cli.command {
        Command::List { args, timeout_ms } => list::run(&ctx, args, *timeout_ms, format),
        Command::Names { args } => names::run(&ctx, args, format),
    };

    // Save the recording even when the command failed. A save failure is
    // reported, but never in place of the command's own error.
    match (ctx.finish(), result) {
        (Ok(saved), result) => {
            if let Some(path) = saved {
                eprintln!("Recording saved to: {}", path.display());
            }
            result
        }
        (Err(save_err), Ok(())) => Err(save_err),
        (Err(save_err), Err(err)) => {
            eprintln!("{save_err}");
            Err(err)
        }
    }
}
