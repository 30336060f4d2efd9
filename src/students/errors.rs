//! # Student Errors
//!
//! Error types for the store layer and the HTTP-facing record handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Result type for store primitives
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for record operations
pub type StudentResult<T> = Result<T, StudentError>;

/// Failures raised by a store backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// Error reported by the MongoDB driver
    #[error("database driver error: {0}")]
    Driver(#[from] mongodb::error::Error),

    /// A document could not be converted between JSON and BSON
    #[error("document conversion failed: {0}")]
    Conversion(String),

    /// Backend cannot serve requests (e.g. poisoned lock)
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// The five record operations, used to pick the generic failure message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Client-visible message for any unexpected failure of this operation
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::List => "Failed to fetch students from the database",
            Operation::Get => "Failed to fetch student from the database",
            Operation::Create => "Failed to create student",
            Operation::Update => "Failed to update student",
            Operation::Delete => "Failed to delete student",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

/// Record operation errors
#[derive(Debug, Error)]
pub enum StudentError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Path identifier is not a valid ObjectId
    #[error("Invalid student id: {0}")]
    InvalidId(String),

    /// Query parameter failed validation
    #[error("Invalid query parameter: {0}")]
    InvalidQueryParam(String),

    /// Record absent
    #[error("Student not found")]
    NotFound,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store failure; the cause is only logged
    #[error("{}", .op.failure_message())]
    Store {
        op: Operation,
        #[source]
        source: StoreError,
    },

    /// A write reported zero affected documents
    #[error("{}", .0.failure_message())]
    NoEffect(Operation),

    /// Store did not answer a health probe
    #[error("Store unavailable")]
    Unavailable,
}

impl StudentError {
    pub fn store(op: Operation, source: StoreError) -> Self {
        StudentError::Store { op, source }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            StudentError::InvalidId(_) => StatusCode::BAD_REQUEST,
            StudentError::InvalidQueryParam(_) => StatusCode::UNPROCESSABLE_ENTITY,
            StudentError::NotFound => StatusCode::NOT_FOUND,
            StudentError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            StudentError::NoEffect(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StudentError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<StudentError> for ErrorResponse {
    fn from(err: StudentError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for StudentError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
