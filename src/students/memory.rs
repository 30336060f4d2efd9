//! In-memory student store
//!
//! Keeps documents in insertion order behind a `RwLock`. Used by the test
//! suite and by `serve --in-memory`.

use std::sync::RwLock;

use async_trait::async_trait;
use mongodb::bson::{Bson, Document};

use super::document::{project, set_path};
use super::errors::{StoreError, StoreResult};
use super::filter::FilterSet;
use super::id::{StudentId, ID_FIELD};
use super::store::{StudentStore, UpdateOutcome};

pub struct MemoryStudentStore {
    documents: RwLock<Vec<Document>>,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
        }
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.documents.read().map(|docs| docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStudentStore {
    fn default() -> Self {
        Self::new()
    }
}

fn has_id(doc: &Document, id: &StudentId) -> bool {
    doc.get_object_id(ID_FIELD)
        .map(|oid| oid == id.object_id())
        .unwrap_or(false)
}

fn poisoned<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn find(&self, filter: &FilterSet, fields: &[&str]) -> StoreResult<Vec<Document>> {
        let docs = self.documents.read().map_err(poisoned)?;
        Ok(docs
            .iter()
            .filter(|doc| filter.matches(doc))
            .map(|doc| project(doc, fields))
            .collect())
    }

    async fn find_one(&self, id: &StudentId) -> StoreResult<Option<Document>> {
        let docs = self.documents.read().map_err(poisoned)?;
        Ok(docs.iter().find(|doc| has_id(doc, id)).cloned())
    }

    async fn insert_one(&self, mut doc: Document) -> StoreResult<Option<StudentId>> {
        let id = StudentId::generate();
        doc.insert(ID_FIELD, Bson::from(id));

        let mut docs = self.documents.write().map_err(poisoned)?;
        docs.push(doc);
        Ok(Some(id))
    }

    async fn update_one(&self, id: &StudentId, changes: Document) -> StoreResult<UpdateOutcome> {
        let mut docs = self.documents.write().map_err(poisoned)?;
        let Some(doc) = docs.iter_mut().find(|doc| has_id(doc, id)) else {
            return Ok(UpdateOutcome::default());
        };

        let mut changed = false;
        for (key, value) in changes {
            if key == ID_FIELD {
                continue;
            }
            changed |= set_path(doc, &key, value);
        }

        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(changed),
        })
    }

    async fn delete_one(&self, id: &StudentId) -> StoreResult<u64> {
        let mut docs = self.documents.write().map_err(poisoned)?;
        match docs.iter().position(|doc| has_id(doc, id)) {
            Some(index) => {
                docs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ping(&self) -> StoreResult<()> {
        self.documents.read().map(|_| ()).map_err(poisoned)
    }
}
