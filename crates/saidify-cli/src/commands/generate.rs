//! Generate command implementation.

use crate::output::format_json;
use saidify_core::PopulateOptions;
use saidify_publish::{generate, Publisher, WriteOptions};
use std::path::PathBuf;
use tracing::debug;

pub fn run(
    schema: PathBuf,
    le: Option<String>,
    publish_root: PathBuf,
    sync: bool,
    json_output: bool,
    options: PopulateOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let publisher =
        Publisher::from_options(publish_root, &options).with_options(WriteOptions { sync });
    debug!(
        schema = %schema.display(),
        publish_root = %publisher.publish_root().display(),
        label = %options.label,
        code = %options.code,
        "generating"
    );

    let publication = generate(&schema, le.as_deref(), &options, &publisher)
        .map_err(|e| format!("Failed to generate {}: {}", schema.display(), e))?;

    if json_output {
        println!("{}", format_json(&publication));
    } else {
        println!("{}", publication.said);
        eprintln!("Wrote {}", publication.source.display());
        eprintln!(
            "Published {} under {} ({} bytes)",
            publication.said,
            publisher.publish_root().display(),
            publication.bytes
        );
    }
    Ok(())
}
