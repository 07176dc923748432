use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or publishing a document.
#[derive(Error, Debug)]
pub enum PublishError {
    /// The input file does not exist.
    #[error("file not found: {0}")]
    NotFound(PathBuf),
    /// I/O error while reading the input.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The input is not valid JSON.
    #[error("invalid JSON in {path}: {source}")]
    InvalidJson {
        /// File being parsed.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },
    /// I/O error while writing an output file.
    #[error("failed to write {path}: {source}")]
    Write {
        /// File being written.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The content-addressed directory could not be created.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        /// Directory being created.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// JSON rendering failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    /// Canonicalization failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] saidify_canonical::CanonicalizationError),
    /// The document's root SAID is missing, malformed or does not match.
    #[error("root SAID check failed: {0}")]
    Said(#[from] saidify_canonical::SaidError),
    /// SAID population failed.
    #[error("SAID population failed: {0}")]
    Populate(#[from] saidify_core::PopulateError),
}
