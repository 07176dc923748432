//! Document loading.

use crate::errors::PublishError;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::Path;

/// Reads and parses a JSON document.
///
/// Member order is preserved, so the document is digested and written back in
/// the layout its author chose. Floats parse to the exact nearest `f64`, so
/// re-serializing reproduces the shortest literal.
///
/// # Errors
///
/// Returns [`PublishError::NotFound`] if the file does not exist,
/// [`PublishError::Read`] for other I/O failures and
/// [`PublishError::InvalidJson`] if the contents do not parse.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Value, PublishError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => PublishError::NotFound(path.to_path_buf()),
        _ => PublishError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;
    serde_json::from_str(&text).map_err(|source| PublishError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}
