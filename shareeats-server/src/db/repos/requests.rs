//! Food request repository

use mongodb::bson::{oid::ObjectId, Document};

use crate::db::store::{
    CollectionName, DeleteOutcome, DocumentStore, InsertOutcome, StoreError, UpdateOutcome,
};
use crate::models::id_filter;

const COLLECTION: CollectionName = CollectionName::Request;

/// Request repository
pub struct RequestRepo<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> RequestRepo<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    pub async fn add(&self, request: Document) -> Result<InsertOutcome, StoreError> {
        self.store.insert_one(COLLECTION, request).await
    }

    /// Requests matching a top-level equality filter (empty = all).
    pub async fn list(&self, filter: Document) -> Result<Vec<Document>, StoreError> {
        self.store.find(COLLECTION, filter).await
    }

    pub async fn get(&self, id: ObjectId) -> Result<Option<Document>, StoreError> {
        self.store.find_one(COLLECTION, id_filter(id)).await
    }

    /// Merge `fields` into the request. Never creates one.
    pub async fn update_fields(
        &self,
        id: ObjectId,
        fields: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        self.store
            .update_one(COLLECTION, id_filter(id), fields, false)
            .await
    }

    pub async fn delete(&self, id: ObjectId) -> Result<DeleteOutcome, StoreError> {
        self.store.delete_one(COLLECTION, id_filter(id)).await
    }
}
