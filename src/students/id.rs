//! Student identifiers
//!
//! Identifiers are MongoDB ObjectIds assigned by the store at insert time.

use std::fmt;
use std::str::FromStr;

use mongodb::bson::oid::ObjectId;
use mongodb::bson::Bson;

use super::errors::StudentError;

/// Field holding the identifier in every stored document
pub const ID_FIELD: &str = "_id";

/// Store-assigned student identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StudentId(ObjectId);

impl StudentId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Parse a path parameter
    pub fn parse(raw: &str) -> Result<Self, StudentError> {
        ObjectId::parse_str(raw)
            .map(Self)
            .map_err(|_| StudentError::InvalidId(raw.to_string()))
    }

    /// Extract an identifier from an inserted-id value; non-ObjectId ids yield `None`
    pub fn from_bson(value: &Bson) -> Option<Self> {
        value.as_object_id().map(Self)
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for StudentId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl From<StudentId> for Bson {
    fn from(id: StudentId) -> Self {
        Bson::ObjectId(id.0)
    }
}

impl FromStr for StudentId {
    type Err = StudentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}
