//! Placeholder store for when no MongoDB client could be built
//!
//! The server still starts and registers every route; each database call
//! fails with the reason recorded at startup.

use async_trait::async_trait;
use mongodb::bson::Document;

use super::store::{
    CollectionName, DeleteOutcome, DocumentStore, InsertOutcome, StoreError, UpdateOutcome,
};

#[derive(Debug, Clone)]
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> StoreError {
        StoreError::Unavailable(self.reason.clone())
    }
}

#[async_trait]
impl DocumentStore for UnavailableStore {
    async fn insert_one(&self, _: CollectionName, _: Document) -> Result<InsertOutcome, StoreError> {
        Err(self.error())
    }

    async fn find(&self, _: CollectionName, _: Document) -> Result<Vec<Document>, StoreError> {
        Err(self.error())
    }

    async fn find_one(
        &self,
        _: CollectionName,
        _: Document,
    ) -> Result<Option<Document>, StoreError> {
        Err(self.error())
    }

    async fn update_one(
        &self,
        _: CollectionName,
        _: Document,
        _: Document,
        _: bool,
    ) -> Result<UpdateOutcome, StoreError> {
        Err(self.error())
    }

    async fn delete_one(&self, _: CollectionName, _: Document) -> Result<DeleteOutcome, StoreError> {
        Err(self.error())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(self.error())
    }
}
