//! Storage seam shared by every backend
//!
//! Handlers never talk to a driver directly. They get an
//! `Arc<dyn DocumentStore>` through application state, which lets tests
//! swap MongoDB for the in-memory store.

use std::fmt;

use async_trait::async_trait;
use mongodb::bson::{Bson, Document};

/// Collections inside the `shareeats` database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionName {
    Food,
    Request,
}

impl CollectionName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Request => "request",
        }
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of `insert_one`
#[derive(Debug, Clone, PartialEq)]
pub struct InsertOutcome {
    pub inserted_id: Bson,
}

/// Result of `update_one`
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<Bson>,
}

/// Result of `delete_one`
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteOutcome {
    pub deleted_count: u64,
}

/// Storage error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),

    /// A document with the same `_id` already exists
    #[error("duplicate key: _id {0}")]
    DuplicateKey(String),

    /// Update rejected before it reached a document (e.g. empty `$set`)
    #[error("invalid update: {0}")]
    InvalidUpdate(String),

    /// No client could be built at startup
    #[error("database unavailable: {0}")]
    Unavailable(String),
}

/// One operation per route, nothing else.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document, assigning `_id` when the caller did not.
    async fn insert_one(
        &self,
        collection: CollectionName,
        document: Document,
    ) -> Result<InsertOutcome, StoreError>;

    /// All documents matching a top-level equality filter, in storage order.
    async fn find(
        &self,
        collection: CollectionName,
        filter: Document,
    ) -> Result<Vec<Document>, StoreError>;

    async fn find_one(
        &self,
        collection: CollectionName,
        filter: Document,
    ) -> Result<Option<Document>, StoreError>;

    /// Apply `{ $set: set }` to the first match. With `upsert`, a missing
    /// document is created from the filter's fields plus `set`.
    async fn update_one(
        &self,
        collection: CollectionName,
        filter: Document,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError>;

    async fn delete_one(
        &self,
        collection: CollectionName,
        filter: Document,
    ) -> Result<DeleteOutcome, StoreError>;

    /// Round-trip to the deployment to confirm connectivity.
    async fn ping(&self) -> Result<(), StoreError>;
}
