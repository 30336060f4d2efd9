//! # Student Store
//!
//! Storage primitives the record handlers are built on. Each call maps to a
//! single document-store operation.

use async_trait::async_trait;
use mongodb::bson::Document;

use super::errors::StoreResult;
use super::filter::FilterSet;
use super::id::StudentId;

/// Counts reported by a single-document update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    /// Documents matching the identifier (0 or 1)
    pub matched: u64,
    /// Documents whose stored value actually changed (0 or 1)
    pub modified: u64,
}

/// Document store backend for the student collection
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Documents matching `filter`, each reduced to `fields` (`_id` excluded)
    async fn find(&self, filter: &FilterSet, fields: &[&str]) -> StoreResult<Vec<Document>>;

    /// Fetch a single document by identifier
    async fn find_one(&self, id: &StudentId) -> StoreResult<Option<Document>>;

    /// Insert a document; the store assigns `_id`.
    ///
    /// Returns `None` when the store did not report an ObjectId.
    async fn insert_one(&self, doc: Document) -> StoreResult<Option<StudentId>>;

    /// Merge `changes` into the identified document (`$set` semantics)
    async fn update_one(&self, id: &StudentId, changes: Document) -> StoreResult<UpdateOutcome>;

    /// Remove the identified document, returning the number removed
    async fn delete_one(&self, id: &StudentId) -> StoreResult<u64>;

    /// Round-trip to the backend
    async fn ping(&self) -> StoreResult<()>;
}
