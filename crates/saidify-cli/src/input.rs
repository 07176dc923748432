//! Input helpers shared by commands.

use serde_json::Value;
use std::io::{self, Read};

/// Reads JSON from a file, or from stdin when no path is given.
pub fn read_json(input: Option<&str>) -> Result<Value, Box<dyn std::error::Error>> {
    let json_str = match input {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read file {}: {}", path, e))?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let value = serde_json::from_str(&json_str).map_err(|e| format!("Invalid JSON: {}", e))?;
    Ok(value)
}
