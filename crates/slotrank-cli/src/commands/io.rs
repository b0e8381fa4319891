//! Shared input/output helpers for JSON-speaking subcommands.

use std::io::Read;
use std::path::Path;

use serde::Serialize;

/// Read the whole of `path`, or stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<String, Box<dyn std::error::Error>> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()).into()),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Parse input as JSON into `T`.
pub fn read_json<T>(path: Option<&Path>) -> Result<T, Box<dyn std::error::Error>>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let content = read_input(path)?;
    serde_json::from_str(&content).map_err(|e| format!("invalid JSON input: {e}").into())
}

pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
