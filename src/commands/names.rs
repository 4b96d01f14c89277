//! `dirents names` command.

use std::ffi::OsString;

use crate::cli::ListArgs;
use crate::config::OutputFormat;
use crate::context::ListingContext;

/// Execute the `names` command.
///
/// # Errors
///
/// Returns an error string if the listing fails or cannot be rendered.
pub fn run(ctx: &ListingContext, args: &ListArgs, format: OutputFormat) -> Result<(), String> {
    let mut names = ctx.reader.read_dirnames(&args.path, None).map_err(|e| e.to_string())?;
    if args.sort {
        names.sort_by(|a, b| a.as_encoded_bytes().cmp(b.as_encoded_bytes()));
    }

    print!("{}", render(&names, format)?);
    Ok(())
}

/// Render names in the requested format. Text output is one name per line.
///
/// # Errors
///
/// Returns an error string if serialization fails.
pub fn render(names: &[OsString], format: OutputFormat) -> Result<String, String> {
    let names: Vec<String> = names.iter().map(|n| n.to_string_lossy().into_owned()).collect();
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&names)
            .map(|s| s + "\n")
            .map_err(|e| format!("Failed to serialize names: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(&names).map_err(|e| format!("Failed to serialize names: {e}"))
        }
        OutputFormat::Text => Ok(names.iter().map(|n| format!("{n}\n")).collect()),
    }
}
