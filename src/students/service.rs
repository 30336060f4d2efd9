//! # Student Service
//!
//! The five record operations. Each translates a request into one store call
//! and maps absence, zero-affected writes and store failures to
//! `StudentError`. Store failure causes are logged here and never returned
//! to the caller.

use std::sync::Arc;

use serde_json::{Map, Value};

use super::document;
use super::errors::{Operation, StoreError, StudentError, StudentResult};
use super::filter::{StudentFilter, AGE_FIELD};
use super::id::{StudentId, ID_FIELD};
use super::response::{CreatedResponse, ListResponse, StudentResponse};
use super::store::StudentStore;

/// Fields returned by the list endpoint
pub const LIST_FIELDS: [&str; 2] = ["name", AGE_FIELD];

/// Record access handlers over a shared store handle
#[derive(Clone)]
pub struct StudentService {
    store: Arc<dyn StudentStore>,
}

fn store_failure(op: Operation, source: StoreError) -> StudentError {
    tracing::error!(operation = op.as_str(), error = %source, "{}", op.failure_message());
    StudentError::store(op, source)
}

impl StudentService {
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        Self { store }
    }

    /// Students matching the filter, projected to name and age
    pub async fn list(&self, filter: &StudentFilter) -> StudentResult<ListResponse> {
        tracing::info!(
            min_age = ?filter.min_age,
            country = ?filter.country,
            "Filtering students"
        );

        let query = filter.to_filter_set();
        let docs = self
            .store
            .find(&query, &LIST_FIELDS)
            .await
            .map_err(|e| store_failure(Operation::List, e))?;

        Ok(ListResponse {
            data: docs.into_iter().map(document::to_json).collect(),
        })
    }

    /// A single student, without its identifier
    pub async fn get(&self, raw_id: &str) -> StudentResult<StudentResponse> {
        tracing::info!(id = raw_id, "Retrieving student");
        let id = StudentId::parse(raw_id)?;

        let found = self
            .store
            .find_one(&id)
            .await
            .map_err(|e| store_failure(Operation::Get, e))?;

        match found {
            Some(mut doc) => {
                doc.remove(ID_FIELD);
                Ok(StudentResponse {
                    student: document::to_json(doc),
                })
            }
            None => {
                tracing::warn!(id = raw_id, "No student found");
                Err(StudentError::NotFound)
            }
        }
    }

    /// Insert the body as a new student; any client-supplied `_id` is dropped
    pub async fn create(&self, mut body: Map<String, Value>) -> StudentResult<CreatedResponse> {
        tracing::info!("Creating a new student");
        body.remove(ID_FIELD);

        let doc = document::from_json(body).map_err(|e| store_failure(Operation::Create, e))?;
        let inserted = self
            .store
            .insert_one(doc)
            .await
            .map_err(|e| store_failure(Operation::Create, e))?;

        match inserted {
            Some(id) => {
                tracing::info!(id = %id, "Student created");
                Ok(CreatedResponse { id: id.to_string() })
            }
            None => {
                tracing::warn!("Insert returned no ObjectId");
                Err(StudentError::NoEffect(Operation::Create))
            }
        }
    }

    /// Merge the body into an existing student.
    ///
    /// A payload that leaves the stored document unchanged is reported as
    /// `NoEffect`, like any other write that affects nothing.
    pub async fn update(&self, raw_id: &str, mut body: Map<String, Value>) -> StudentResult<()> {
        tracing::info!(id = raw_id, "Updating student");
        let id = StudentId::parse(raw_id)?;
        body.remove(ID_FIELD);

        let changes =
            document::from_json(body).map_err(|e| store_failure(Operation::Update, e))?;
        let outcome = self
            .store
            .update_one(&id, changes)
            .await
            .map_err(|e| store_failure(Operation::Update, e))?;

        if outcome.matched == 0 {
            tracing::warn!(id = raw_id, "No student found");
            return Err(StudentError::NotFound);
        }
        if outcome.modified == 0 {
            tracing::warn!(id = raw_id, "Update modified no fields");
            return Err(StudentError::NoEffect(Operation::Update));
        }

        tracing::info!(id = raw_id, "Student updated");
        Ok(())
    }

    pub async fn delete(&self, raw_id: &str) -> StudentResult<()> {
        tracing::info!(id = raw_id, "Deleting student");
        let id = StudentId::parse(raw_id)?;

        let deleted = self
            .store
            .delete_one(&id)
            .await
            .map_err(|e| store_failure(Operation::Delete, e))?;

        if deleted == 0 {
            tracing::warn!(id = raw_id, "No student found");
            return Err(StudentError::NotFound);
        }

        tracing::info!(id = raw_id, "Student deleted");
        Ok(())
    }

    /// Probe the store for readiness
    pub async fn ping(&self) -> StudentResult<()> {
        self.store.ping().await.map_err(|e| {
            tracing::warn!(error = %e, "Store ping failed");
            StudentError::Unavailable
        })
    }
}
