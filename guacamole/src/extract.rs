//! Count extraction from raw JSON payloads.
//!
//! The session API returns a map of identifier to details for users and
//! active connections, and a list of entries for connection history. Only the
//! cardinality is needed, so payloads are parsed into `serde_json::Value` and
//! never into per-item models.

use serde_json::Value;
use std::fmt;

use crate::error::ParseError;

/// Expected top-level shape of a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A JSON array; the count is its length.
    List,
    /// A JSON object; the count is its number of keys.
    Map,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "array"),
            Self::Map => write!(f, "object"),
        }
    }
}

/// Returns the number of top-level items in `raw`.
///
/// # Errors
///
/// Returns an error if:
/// - `raw` is not valid JSON
/// - The top-level value is not of the expected `shape`
///
/// # Example
///
/// ```
/// use guacamole::{extract_count, Shape};
///
/// assert_eq!(extract_count(br#"[{}, {}, {}]"#, Shape::List).unwrap(), 3);
/// assert_eq!(extract_count(br#"{"alice": {}, "bob": {}}"#, Shape::Map).unwrap(), 2);
/// assert!(extract_count(br#"{}"#, Shape::List).is_err());
/// ```
pub fn extract_count(raw: &[u8], shape: Shape) -> Result<usize, ParseError> {
    let value: Value = serde_json::from_slice(raw)?;

    match (shape, &value) {
        (Shape::List, Value::Array(items)) => Ok(items.len()),
        (Shape::Map, Value::Object(entries)) => Ok(entries.len()),
        _ => Err(ParseError::Shape {
            expected: shape,
            found: json_type(&value),
        }),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
