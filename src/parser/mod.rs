//! Document parsing module.
//!
//! Turns JSON input into a [`Document`]. All functions here return typed
//! errors; the total entry points in the crate root turn those into fallback
//! output.

mod options;
mod tree;

pub use options::{ErrorMode, ParseOptions, DEFAULT_MAX_DEPTH};
pub use tree::TreeBuilder;

use crate::error::Result;
use crate::model::Document;
use serde_json::Value;
use std::io::Read;

/// Build a document from an already deserialized JSON value.
///
/// Returns `Ok(None)` when the value has no `content` array.
pub fn parse_value(value: &Value, options: &ParseOptions) -> Result<Option<Document>> {
    TreeBuilder::new(options).build(value)
}

/// Build a document from JSON text.
pub fn parse_str(input: &str, options: &ParseOptions) -> Result<Option<Document>> {
    let value: Value = serde_json::from_str(input)?;
    parse_value(&value, options)
}

/// Build a document from a reader producing JSON text.
pub fn parse_reader<R: Read>(mut reader: R, options: &ParseOptions) -> Result<Option<Document>> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_str(&input, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_parse_str_invalid_json() {
        let result = parse_str("{not valid json", &ParseOptions::default());
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_parse_reader() {
        let input = br#"{"version":1,"type":"doc","content":[{"type":"rule"}]}"#;
        let doc = parse_reader(&input[..], &ParseOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(doc.len(), 1);
    }
}
