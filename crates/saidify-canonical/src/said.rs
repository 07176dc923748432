//! Self-addressing identifier computation.
//!
//! A SAID is computed over the whole containing object with its own label
//! field set to a placeholder of the final encoded length:
//! `code.encode(digest(canonical_bytes(object[label := "#" * 44])))`.
//! Because the placeholder and the SAID have the same length, the byte
//! layout of the object is identical before and after the SAID is embedded.

use crate::{Canonicalizer, DigestCode, Said};
use serde_json::{Map, Value};

/// Error during SAID computation or verification.
#[derive(thiserror::Error, Debug)]
pub enum SaidError {
    /// Canonicalization failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] crate::CanonicalizationError),
    /// The embedded SAID or digest code is malformed.
    #[error("invalid SAID: {0}")]
    Invalid(#[from] crate::ValidationError),
    /// The object carries no value at the label.
    #[error("missing SAID field '{0}'")]
    MissingLabel(String),
    /// The value at the label is not a string.
    #[error("SAID field '{label}' is not a string: {value}")]
    NotAString {
        /// Label that was inspected.
        label: String,
        /// Offending value.
        value: Value,
    },
    /// Raw bytes did not parse as JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Raw bytes parsed but the top-level value is not an object.
    #[error("expected a JSON object at the top level")]
    NotAnObject,
    /// Raw bytes are not the canonical serialization of their own content.
    #[error("bytes are not in canonical form")]
    NonCanonical,
    /// Recomputed SAID differs from the embedded one.
    #[error("SAID mismatch: embedded {embedded} but computed {computed}")]
    Mismatch {
        /// SAID found in the object.
        embedded: Said,
        /// SAID recomputed from content.
        computed: Said,
    },
}

/// Computes the SAID of `sad` without modifying it.
///
/// The label is set to the placeholder on a copy; if the label is absent it
/// is appended as the last member, matching where [`saidify`] will put it.
pub fn compute_said(
    sad: &Map<String, Value>,
    label: &str,
    code: DigestCode,
    canonicalizer: &Canonicalizer,
) -> Result<Said, SaidError> {
    let mut dummied = sad.clone();
    dummied.insert(label.to_string(), Value::String(code.placeholder()));
    let bytes = canonicalizer.canonicalize(&Value::Object(dummied))?;
    Ok(code.said_of(&bytes))
}

/// Computes the SAID of `sad` and returns the object with it embedded.
pub fn saidify(
    mut sad: Map<String, Value>,
    label: &str,
    code: DigestCode,
    canonicalizer: &Canonicalizer,
) -> Result<(Map<String, Value>, Said), SaidError> {
    let said = compute_said(&sad, label, code, canonicalizer)?;
    sad.insert(label.to_string(), Value::String(said.to_string()));
    Ok((sad, said))
}

/// Reads the SAID embedded at `label`.
pub fn embedded_said(sad: &Map<String, Value>, label: &str) -> Result<Said, SaidError> {
    match sad.get(label) {
        None => Err(SaidError::MissingLabel(label.to_string())),
        Some(Value::String(s)) => Ok(Said::parse(s.as_str())?),
        Some(other) => Err(SaidError::NotAString {
            label: label.to_string(),
            value: other.clone(),
        }),
    }
}

/// Verifies the SAID embedded at `label`, using the code it declares.
///
/// Returns `Ok(false)` when the object was modified after the SAID was
/// computed; errors only when the SAID cannot be read at all.
pub fn verify_said(
    sad: &Map<String, Value>,
    label: &str,
    canonicalizer: &Canonicalizer,
) -> Result<bool, SaidError> {
    let embedded = embedded_said(sad, label)?;
    let computed = compute_said(sad, label, embedded.code(), canonicalizer)?;
    Ok(computed == embedded)
}

/// Verifies that `raw` is a canonical, self-addressed document.
///
/// On success returns the document's SAID, which is also the name of the
/// content-addressed location the bytes belong under.
pub fn verify_raw(raw: &[u8], label: &str, canonicalizer: &Canonicalizer) -> Result<Said, SaidError> {
    let value: Value = serde_json::from_slice(raw)?;
    if canonicalizer.canonicalize(&value)? != raw {
        return Err(SaidError::NonCanonical);
    }
    let sad = value.as_object().ok_or(SaidError::NotAnObject)?;
    let embedded = embedded_said(sad, label)?;
    let computed = compute_said(sad, label, embedded.code(), canonicalizer)?;
    if computed != embedded {
        return Err(SaidError::Mismatch { embedded, computed });
    }
    Ok(embedded)
}
