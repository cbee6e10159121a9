//! JSON output writer.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde_json::Value;

use crate::error::Result;

/// Serialize a value, pretty-printed with two-space indentation or compact,
/// always followed by a newline.
///
/// # Errors
/// Returns `JsonSerialization` if the value cannot be serialized.
pub fn to_json_string(value: &Value, pretty: bool) -> Result<String> {
    let mut json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    json.push('\n');
    Ok(json)
}

/// Write a value as JSON to `path`, or to stdout when no path is given.
///
/// # Errors
/// Returns an error if serialization or writing fails.
pub fn write_json(value: &Value, path: Option<&Path>, pretty: bool) -> Result<()> {
    let json = to_json_string(value, pretty)?;
    match path {
        Some(path) => {
            fs::write(path, json)?;
            tracing::debug!(path = %path.display(), "Wrote JSON output");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
