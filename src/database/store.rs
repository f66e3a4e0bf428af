use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::filter::{FilterData, FilterError};

/// A stored document: the JSON body only, never the backend's row key.
pub type Document = Map<String, Value>;

/// Errors from record store backends
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Unsupported storage scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Document error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl From<FilterError> for DatabaseError {
    fn from(err: FilterError) -> Self {
        DatabaseError::QueryError(err.to_string())
    }
}

/// Outcome of a write that targets existing documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteResult {
    /// Documents matched (update) or removed (delete)
    pub affected: u64,
    /// True when an upsert inserted a new document
    pub upserted: bool,
}

/// Document persistence over named collections.
///
/// Every operation touches a single collection. Only `replace_all` spans more
/// than one document atomically.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn get_one(&self, collection: &str, filter: FilterData) -> Result<Option<Document>, DatabaseError>;

    /// Insertion order unless `filter.order` says otherwise.
    async fn list(&self, collection: &str, filter: FilterData) -> Result<Vec<Document>, DatabaseError>;

    async fn insert(&self, collection: &str, document: Document) -> Result<(), DatabaseError>;

    async fn insert_many(&self, collection: &str, documents: Vec<Document>) -> Result<(), DatabaseError>;

    /// Merge `document`'s top-level fields into the first match; insert it when
    /// nothing matches and `upsert` is set.
    async fn update(
        &self,
        collection: &str,
        filter: FilterData,
        document: Document,
        upsert: bool,
    ) -> Result<WriteResult, DatabaseError>;

    /// Remove the first match only
    async fn delete(&self, collection: &str, filter: FilterData) -> Result<WriteResult, DatabaseError>;

    async fn delete_many(&self, collection: &str, filter: FilterData) -> Result<WriteResult, DatabaseError>;

    /// Swap the whole collection for `documents` in one step.
    async fn replace_all(&self, collection: &str, documents: Vec<Document>) -> Result<(), DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;

    async fn close(&self);
}
