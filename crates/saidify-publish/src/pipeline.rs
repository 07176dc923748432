//! The one-shot load → inject → populate → publish run.

use crate::errors::PublishError;
use crate::reader::load_document;
use crate::writer::{Publication, Publisher};
use saidify_core::{inject_le, populate, PopulateOptions};
use std::path::Path;
use tracing::info;

/// Populates the schema at `source` and publishes it under `publisher`.
///
/// When `le` is given it is written to the legal-entity constant before any
/// digest is computed, so it is covered by the root SAID. Nothing is written
/// unless loading, injection and population all succeed.
pub fn generate<P: AsRef<Path>>(
    source: P,
    le: Option<&str>,
    options: &PopulateOptions,
    publisher: &Publisher,
) -> Result<Publication, PublishError> {
    let source = source.as_ref();
    let mut document = load_document(source)?;
    if let Some(le) = le {
        inject_le(&mut document, le)?;
        info!(le, "set legal-entity schema constant");
    }
    let document = populate(document, options)?;
    publisher.publish(source, &document)
}
