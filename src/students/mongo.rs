//! MongoDB student store
//!
//! One `Client` (and its connection pool) is created at startup and shared by
//! every request.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use super::errors::StoreResult;
use super::filter::FilterSet;
use super::id::{StudentId, ID_FIELD};
use super::store::{StudentStore, UpdateOutcome};

/// Default database name
pub const DEFAULT_DATABASE: &str = "CosmoCloud";

/// Default collection name
pub const DEFAULT_COLLECTION: &str = "Student";

/// Connection settings for the MongoDB backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Connection string (`mongodb://` or `mongodb+srv://`)
    pub url: String,

    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_database() -> String {
    DEFAULT_DATABASE.to_string()
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

impl StoreConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: default_database(),
            collection: default_collection(),
        }
    }
}

pub struct MongoStudentStore {
    client: Client,
    database: String,
    collection: Collection<Document>,
}

impl MongoStudentStore {
    /// Build a client from the connection string.
    ///
    /// The driver connects lazily; the first operation (or `ping`) surfaces
    /// network errors.
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let client = Client::with_uri_str(&config.url).await?;
        Ok(Self::from_client(client, &config.database, &config.collection))
    }

    pub fn from_client(client: Client, database: &str, collection: &str) -> Self {
        let collection = client.database(database).collection::<Document>(collection);
        Self {
            client,
            database: database.to_string(),
            collection,
        }
    }
}

fn by_id(id: &StudentId) -> Document {
    doc! { ID_FIELD: id.object_id() }
}

#[async_trait]
impl StudentStore for MongoStudentStore {
    async fn find(&self, filter: &FilterSet, fields: &[&str]) -> StoreResult<Vec<Document>> {
        let mut projection = doc! { ID_FIELD: 0 };
        for field in fields {
            projection.insert(*field, 1);
        }

        let query = filter.to_document();
        tracing::debug!(filter = %query, "mongo find");

        let cursor = self.collection.find(query).projection(projection).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        Ok(docs)
    }

    async fn find_one(&self, id: &StudentId) -> StoreResult<Option<Document>> {
        Ok(self.collection.find_one(by_id(id)).await?)
    }

    async fn insert_one(&self, doc: Document) -> StoreResult<Option<StudentId>> {
        let result = self.collection.insert_one(doc).await?;
        Ok(StudentId::from_bson(&result.inserted_id))
    }

    async fn update_one(&self, id: &StudentId, changes: Document) -> StoreResult<UpdateOutcome> {
        let result = self
            .collection
            .update_one(by_id(id), doc! { "$set": changes })
            .await?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_one(&self, id: &StudentId) -> StoreResult<u64> {
        let result = self.collection.delete_one(by_id(id)).await?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}
