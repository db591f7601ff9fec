//! Food listing repository
//!
//! One storage call per method:
//! - add / all / get: plain insert and lookups
//! - by_quantity: filtered find, coerced and sorted in memory
//! - upsert_listing: `$set` of the four listing fields with upsert

use mongodb::bson::{oid::ObjectId, Document};

use crate::db::store::{CollectionName, DocumentStore, InsertOutcome, StoreError, UpdateOutcome};
use crate::models::{id_filter, sort_by_quantity, FoodUpdate};

const COLLECTION: CollectionName = CollectionName::Food;

/// Food repository
pub struct FoodRepo<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> FoodRepo<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    pub async fn add(&self, listing: Document) -> Result<InsertOutcome, StoreError> {
        self.store.insert_one(COLLECTION, listing).await
    }

    pub async fn all(&self) -> Result<Vec<Document>, StoreError> {
        self.store.find(COLLECTION, Document::new()).await
    }

    /// Listings matching `filter`, largest `foodQuantity` first.
    pub async fn by_quantity(&self, filter: Document) -> Result<Vec<Document>, StoreError> {
        let mut listings = self.store.find(COLLECTION, filter).await?;
        sort_by_quantity(&mut listings);
        Ok(listings)
    }

    pub async fn get(&self, id: ObjectId) -> Result<Option<Document>, StoreError> {
        self.store.find_one(COLLECTION, id_filter(id)).await
    }

    /// Write name/image/price/description, creating the listing if absent.
    pub async fn upsert_listing(
        &self,
        id: ObjectId,
        update: FoodUpdate,
    ) -> Result<UpdateOutcome, StoreError> {
        self.store
            .update_one(COLLECTION, id_filter(id), update.into_set(), true)
            .await
    }
}
