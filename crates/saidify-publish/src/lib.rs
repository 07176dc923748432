//! Loading and publishing of SAID-populated JSON Schema documents.
//!
//! This crate provides:
//! - [`load_document`] to read a schema with its member order intact
//! - [`Publisher`] to rewrite the source and emit a content-addressed copy
//! - [`generate`] to run the whole load → populate → publish sequence
//!
//! ## Output layout
//!
//! ```text
//! schema.json                      indented, human-readable, all SAIDs embedded
//! publish/<root-SAID>/index.json   canonical bytes; digests to <root-SAID>
//! ```
//!
//! Outputs are content-addressed, so a failed run is recovered by rerunning.

#![deny(missing_docs)]

/// Error types for loading and publishing.
pub mod errors;
/// Full generation run.
pub mod pipeline;
/// Document loading.
pub mod reader;
/// Publisher implementation.
pub mod writer;

pub use errors::PublishError;
pub use pipeline::generate;
pub use reader::load_document;
pub use writer::{Publication, Publisher, WriteOptions, ARTIFACT_FILE_NAME, DEFAULT_PUBLISH_ROOT};
