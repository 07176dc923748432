use serde_json::Value;
use tracing::debug;

use crate::errors::{kind_of, PopulateError};

/// Location of the legal-entity constant in the discovery schema's second
/// edge variant. The value written here is digested along with the rest of
/// the document.
pub const LE_CONST_POINTER: &str = "/properties/e/oneOf/1/properties/le/properties/s/const";

/// Sets the value addressed by a JSON pointer.
///
/// Every segment but the last must already exist. The last segment is
/// created when its parent is an object and replaced when it is an existing
/// array index.
pub fn inject_value(document: &mut Value, pointer: &str, value: Value) -> Result<(), PopulateError> {
    if !pointer.starts_with('/') {
        return Err(PopulateError::InvalidPointer(pointer.to_string()));
    }
    let (parent_pointer, last) = pointer
        .rsplit_once('/')
        .ok_or_else(|| PopulateError::InvalidPointer(pointer.to_string()))?;
    let key = last.replace("~1", "/").replace("~0", "~");

    let parent = document
        .pointer_mut(parent_pointer)
        .ok_or_else(|| PopulateError::MissingPath(parent_pointer.to_string()))?;

    match parent {
        Value::Object(map) => {
            map.insert(key, value);
        }
        Value::Array(items) => {
            let slot = key
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get_mut(index))
                .ok_or_else(|| PopulateError::MissingPath(pointer.to_string()))?;
            *slot = value;
        }
        other => {
            return Err(PopulateError::Shape {
                path: parent_pointer.to_string(),
                expected: "object",
                found: kind_of(other),
            })
        }
    }
    debug!(pointer, "injected value");
    Ok(())
}

/// Writes `le` as the legal-entity constant at [`LE_CONST_POINTER`].
pub fn inject_le(document: &mut Value, le: &str) -> Result<(), PopulateError> {
    inject_value(document, LE_CONST_POINTER, Value::String(le.to_string()))
}
