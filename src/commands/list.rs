//! `dirents list` command.

use std::sync::Arc;
use std::time::Duration;

use crate::cli::ListArgs;
use crate::config::OutputFormat;
use crate::context::ListingContext;
use crate::deadline;
use crate::dirent::Dirents;

/// Execute the `list` command.
///
/// # Errors
///
/// Returns an error string if the listing fails, times out, or cannot be
/// rendered.
pub fn run(
    ctx: &ListingContext,
    args: &ListArgs,
    timeout_ms: Option<u64>,
    format: OutputFormat,
) -> Result<(), String> {
    let mut entries = match timeout_ms {
        Some(ms) => deadline::block_on_within(
            Arc::clone(&ctx.reader),
            args.path.clone(),
            Duration::from_millis(ms),
        )
        .map_err(|e| e.to_string())?,
        None => ctx.reader.read_dirents(&args.path, None).map_err(|e| e.to_string())?,
    };
    if args.sort {
        entries.sort_by_name();
    }

    print!("{}", render(&entries, format)?);
    Ok(())
}

/// Render entries in the requested format.
///
/// # Errors
///
/// Returns an error string if serialization fails.
pub fn render(entries: &Dirents, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(entries)
            .map(|s| s + "\n")
            .map_err(|e| format!("Failed to serialize entries: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(entries).map_err(|e| format!("Failed to serialize entries: {e}"))
        }
        OutputFormat::Text => Ok(render_table(entries)),
    }
}

fn render_table(entries: &Dirents) -> String {
    if entries.is_empty() {
        return "No entries.\n".to_string();
    }

    let type_width =
        entries.iter().map(|d| d.file_type().as_str().len()).max().unwrap_or(4).max(4);
    let mut out = format!("{:<type_width$}  NAME\n{:-<type_width$}  ----\n", "TYPE", "");
    for entry in entries {
        let kind = entry.file_type().as_str();
        out.push_str(&format!("{kind:<type_width$}  {}\n", entry.name().to_string_lossy()));
    }
    let noun = if entries.len() == 1 { "entry" } else { "entries" };
    out.push_str(&format!("\n{} {noun} total.\n", entries.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dirent::{Dirent, FileKind};

    fn sample() -> Dirents {
        vec![
            Dirent::new("dir1", FileKind::Directory).unwrap(),
            Dirent::new("file3", FileKind::Regular).unwrap(),
        ]
        .into()
    }

    #[test]
    fn text_table_aligns_types() {
        let out = render(&sample(), OutputFormat::Text).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "TYPE       NAME");
        assert_eq!(lines[2], "directory  dir1");
        assert_eq!(lines[3], "regular    file3");
        assert!(out.ends_with("2 entries total.\n"));
    }

    #[test]
    fn empty_listing_says_so() {
        assert_eq!(render(&Dirents::new(), OutputFormat::Text).unwrap(), "No entries.\n");
    }

    #[test]
    fn json_lists_name_and_type() {
        let out = render(&sample(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0], serde_json::json!({"name": "dir1", "type": "directory"}));
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn yaml_lists_name_and_type() {
        let out = render(&sample(), OutputFormat::Yaml).unwrap();
        assert!(out.contains("- name: file3\n  type: regular"), "{out}");
    }
}
