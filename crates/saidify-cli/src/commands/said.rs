//! Said command implementation.

use crate::input::read_json;
use crate::output::format_json;
use saidify_core::{inject_le, populate, PopulateOptions};

/// Prints the document with every SAID populated; nothing is written to disk.
pub fn run(
    input: Option<String>,
    le: Option<String>,
    options: PopulateOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut document = read_json(input.as_deref())?;
    if let Some(le) = le {
        inject_le(&mut document, &le)?;
    }
    let document = populate(document, &options)?;
    println!("{}", format_json(&document));
    Ok(())
}
