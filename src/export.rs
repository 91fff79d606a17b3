// Author: Dustin Pilgrim
// License: MIT

use std::path::Path;

use crate::ast::Document;
use crate::ScfError;

/// Convert a document to a JSON value.
///
/// - Sections become objects keyed by section name
/// - Booleans, integers, floats and strings map directly
/// - Lists and tuples become arrays
/// - Maps become objects; non-string keys are written in their literal form
///   (`10`, `(1, 2)`, ...)
pub fn document_to_json(doc: &Document) -> Result<serde_json::Value, ScfError> {
    serde_json::to_value(doc).map_err(|e| ScfError::SyntaxError {
        message: format!("Failed to convert document to JSON: {}", e),
        line: 0,
        column: 0,
        hint: Some("Floats must be finite to be represented in JSON".into()),
        code: Some(500),
    })
}

/// Export an SCF document to pretty-printed JSON.
///
/// # Examples
/// ```rust
/// let doc = scf::parse("{s}\npair = (1, 2)").unwrap();
/// let json = scf::export::export_document_to_json(&doc).unwrap();
/// assert!(json.contains("\"pair\""));
/// ```
pub fn export_document_to_json(doc: &Document) -> Result<String, ScfError> {
    let value = document_to_json(doc)?;
    serde_json::to_string_pretty(&value).map_err(|e| ScfError::SyntaxError {
        message: format!("Failed to serialize JSON: {}", e),
        line: 0,
        column: 0,
        hint: None,
        code: Some(500),
    })
}

/// Export an SCF file directly to JSON.
///
/// Convenience function that reads, resolves imports, parses, and exports in one call.
///
/// # Errors
/// Returns error if the file doesn't exist or contains invalid SCF syntax.
pub fn export_file<P: AsRef<Path>>(path: P) -> Result<String, ScfError> {
    let doc = crate::read(path)?;
    export_document_to_json(&doc)
}
