//! Canonicalize command implementation.

use crate::input::read_json;
use saidify_canonical::{Canonicalizer, Serialization};

pub fn run(
    input: Option<String>,
    serialization: Serialization,
) -> Result<(), Box<dyn std::error::Error>> {
    let value = read_json(input.as_deref())?;
    let bytes = Canonicalizer::new(serialization)
        .canonicalize(&value)
        .map_err(|e| format!("Canonicalization failed: {}", e))?;

    println!("{}", String::from_utf8_lossy(&bytes));
    Ok(())
}
