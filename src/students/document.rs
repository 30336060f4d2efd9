//! Document helpers
//!
//! JSON <-> BSON conversion at the HTTP boundary, and dotted-path access
//! (`address.country`) for the in-memory backend.

use mongodb::bson::{Bson, Document};
use serde_json::{Map, Value};

use super::errors::{StoreError, StoreResult};

/// Convert a request body into a BSON document.
///
/// Integers that fit in 32 bits become `Int32`, larger ones `Int64`.
/// Extended-JSON wrappers such as `{"$oid": ...}` are honoured.
pub fn from_json(map: Map<String, Value>) -> StoreResult<Document> {
    match Bson::try_from(Value::Object(map)) {
        Ok(Bson::Document(doc)) => Ok(doc),
        Ok(other) => Err(StoreError::Conversion(format!(
            "expected an object, got {:?}",
            other.element_type()
        ))),
        Err(e) => Err(StoreError::Conversion(e.to_string())),
    }
}

/// Render a stored document as relaxed extended JSON
pub fn to_json(doc: Document) -> Value {
    Bson::Document(doc).into_relaxed_extjson()
}

/// Resolve a dotted path inside a document
pub fn get_path<'a>(doc: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut parts = path.split('.');
    let mut current = doc.get(parts.next()?)?;
    for part in parts {
        current = current.as_document()?.get(part)?;
    }
    Some(current)
}

/// Set a dotted path, creating intermediate documents as needed.
///
/// Returns true when the stored value changed.
pub fn set_path(doc: &mut Document, path: &str, value: Bson) -> bool {
    match path.split_once('.') {
        None => {
            if doc.get(path) == Some(&value) {
                return false;
            }
            doc.insert(path, value);
            true
        }
        Some((head, rest)) => {
            if !matches!(doc.get(head), Some(Bson::Document(_))) {
                doc.insert(head, Document::new());
            }
            match doc.get_mut(head) {
                Some(Bson::Document(inner)) => set_path(inner, rest, value),
                _ => false,
            }
        }
    }
}

/// Keep only the listed top-level fields
pub fn project(doc: &Document, fields: &[&str]) -> Document {
    let mut out = Document::new();
    for field in fields {
        if let Some(value) = doc.get(*field) {
            out.insert(*field, value.clone());
        }
    }
    out
}
