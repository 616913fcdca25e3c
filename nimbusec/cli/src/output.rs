//! Output rendering for command results.

use std::io::{self, Write};
use std::path::Path;

use color_eyre::eyre::{Context, Result};
use serde::Serialize;

/// Writes `value` to stdout as pretty-printed JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render JSON output")?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}

/// Writes raw bytes to `path`, or to stdout when no path is given.
pub fn write_bytes(bytes: &[u8], path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, bytes)
            .wrap_err_with(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
            Ok(())
        }
    }
}
