//! # Response Formatting
//!
//! Success envelopes for the student endpoints.

use serde::Serialize;
use serde_json::Value;

/// List response: `{"data": [...]}`
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub data: Vec<Value>,
}

/// Single record response: `{"student": {...}}`
#[derive(Debug, Clone, Serialize)]
pub struct StudentResponse {
    pub student: Value,
}

/// Create response: `{"id": "..."}`
#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}
