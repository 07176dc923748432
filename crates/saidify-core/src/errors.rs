use serde_json::Value;
use thiserror::Error;

/// Errors raised while discovering, populating or verifying SAID sites.
#[derive(Error, Debug)]
pub enum PopulateError {
    /// A reserved location holds a value of the wrong JSON type.
    #[error("expected {expected} at {path}, found {found}")]
    Shape {
        /// JSON pointer of the offending value.
        path: String,
        /// JSON type required there.
        expected: &'static str,
        /// JSON type actually found.
        found: &'static str,
    },
    /// Digest computation failed.
    #[error("SAID computation failed: {0}")]
    Said(#[from] saidify_canonical::SaidError),
    /// A JSON pointer does not address an existing value.
    #[error("no value at {0}")]
    MissingPath(String),
    /// A JSON pointer is syntactically invalid.
    #[error("invalid JSON pointer '{0}'")]
    InvalidPointer(String),
}

impl PopulateError {
    pub(crate) fn shape(path: impl Into<String>, expected: &'static str, found: &Value) -> Self {
        PopulateError::Shape {
            path: path.into(),
            expected,
            found: kind_of(found),
        }
    }
}

/// Name of a JSON value's type, for error messages.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
