//! # Student Records
//!
//! Record access over a single collection of student documents:
//! list-with-filter, get-by-id, create, partial update and delete.
//!
//! The store is reached through the `StudentStore` trait, backed by MongoDB
//! in production and by an in-memory collection in tests.

pub mod document;
pub mod errors;
pub mod filter;
pub mod id;
pub mod memory;
pub mod mongo;
pub mod response;
pub mod service;
pub mod store;

pub use errors::{ErrorResponse, Operation, StoreError, StoreResult, StudentError, StudentResult};
pub use filter::{FilterExpr, FilterOperator, FilterSet, StudentFilter};
pub use id::StudentId;
pub use memory::MemoryStudentStore;
pub use mongo::{MongoStudentStore, StoreConfig};
pub use response::{CreatedResponse, ListResponse, StudentResponse};
pub use service::StudentService;
pub use store::{StudentStore, UpdateOutcome};
