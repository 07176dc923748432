use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Error returned when canonicalization fails.
#[derive(thiserror::Error, Debug)]
pub enum CanonicalizationError {
    /// Provided JSON could not be serialized.
    #[error("invalid JSON structure: {0}")]
    InvalidStructure(String),
    /// Generic failure.
    #[error("other error: {0}")]
    Other(String),
}

/// Byte layout used when a document is digested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Serialization {
    /// Whitespace-free JSON with object members in document order.
    ///
    /// This is the layout JSON Schema SAIDs are conventionally computed over.
    #[default]
    Compact,
    /// RFC 8785 JSON Canonicalization Scheme (members sorted by key).
    Jcs,
}

impl fmt::Display for Serialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Serialization::Compact => write!(f, "compact"),
            Serialization::Jcs => write!(f, "jcs"),
        }
    }
}

impl FromStr for Serialization {
    type Err = CanonicalizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compact" => Ok(Serialization::Compact),
            "jcs" => Ok(Serialization::Jcs),
            other => Err(CanonicalizationError::Other(format!(
                "unknown serialization '{}' (expected 'compact' or 'jcs')",
                other
            ))),
        }
    }
}

/// Canonicalizer that emits deterministic bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Canonicalizer {
    serialization: Serialization,
}

impl Canonicalizer {
    /// Creates a new canonicalizer for the provided serialization.
    pub fn new(serialization: Serialization) -> Self {
        Self { serialization }
    }

    /// Serialization this canonicalizer emits.
    pub fn serialization(&self) -> Serialization {
        self.serialization
    }

    /// Produces canonical bytes for `value`.
    pub fn canonicalize(&self, value: &Value) -> Result<Vec<u8>, CanonicalizationError> {
        match self.serialization {
            // serde_json is built with `preserve_order`, so members keep the
            // order they were parsed or inserted in.
            Serialization::Compact => serde_json::to_vec(value)
                .map_err(|err| CanonicalizationError::InvalidStructure(err.to_string())),
            Serialization::Jcs => canonical_json::to_string(value)
                .map(String::into_bytes)
                .map_err(|err| CanonicalizationError::Other(err.to_string())),
        }
    }
}
