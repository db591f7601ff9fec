//! In-process store
//!
//! Mirrors the MongoDB behavior the gateway relies on:
//! - `_id` assigned as an ObjectId (first key) when absent
//! - top-level equality filters, numbers compared by value, `null` matching missing fields
//! - `$set` counts a document as modified only when a value actually changes
//! - upserts seed the new document from the filter's equality fields
//!
//! Used by the test suites and by `serve --in-memory`.

use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use tokio::sync::RwLock;

use super::store::{
    CollectionName, DeleteOutcome, DocumentStore, InsertOutcome, StoreError, UpdateOutcome,
};

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<CollectionName, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_one(
        &self,
        collection: CollectionName,
        document: Document,
    ) -> Result<InsertOutcome, StoreError> {
        let document = with_id(document);
        let id = document.get("_id").cloned().unwrap_or(Bson::Null);

        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection).or_default();

        if documents
            .iter()
            .any(|existing| existing.get("_id").is_some_and(|e| values_equal(e, &id)))
        {
            return Err(StoreError::DuplicateKey(id.to_string()));
        }

        documents.push(document);
        Ok(InsertOutcome { inserted_id: id })
    }

    async fn find(
        &self,
        collection: CollectionName,
        filter: Document,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| filter_matches(document, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_one(
        &self,
        collection: CollectionName,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.get(&collection).and_then(|documents| {
            documents
                .iter()
                .find(|document| filter_matches(document, &filter))
                .cloned()
        }))
    }

    async fn update_one(
        &self,
        collection: CollectionName,
        filter: Document,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError> {
        if set.is_empty() {
            return Err(StoreError::InvalidUpdate(
                "'$set' is empty. You must specify a field like so: {$set: {<field>: ...}}"
                    .to_string(),
            ));
        }

        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection).or_default();

        if let Some(document) = documents.iter_mut().find(|d| filter_matches(d, &filter)) {
            if let (Some(new_id), Some(old_id)) = (set.get("_id"), document.get("_id")) {
                if !values_equal(new_id, old_id) {
                    return Err(immutable_id());
                }
            }

            let mut modified = false;
            for (key, value) in set {
                if document.get(&key) != Some(&value) {
                    document.insert(key, value);
                    modified = true;
                }
            }

            return Ok(UpdateOutcome {
                matched_count: 1,
                modified_count: u64::from(modified),
                upserted_id: None,
            });
        }

        if !upsert {
            return Ok(UpdateOutcome {
                matched_count: 0,
                modified_count: 0,
                upserted_id: None,
            });
        }

        let mut seeded: Document = filter
            .into_iter()
            .filter(|(key, _)| !key.starts_with('$'))
            .collect();
        if let (Some(new_id), Some(seed_id)) = (set.get("_id"), seeded.get("_id")) {
            if !values_equal(new_id, seed_id) {
                return Err(immutable_id());
            }
        }
        for (key, value) in set {
            seeded.insert(key, value);
        }

        let document = with_id(seeded);
        let id = document.get("_id").cloned();
        documents.push(document);

        Ok(UpdateOutcome {
            matched_count: 0,
            modified_count: 0,
            upserted_id: id,
        })
    }

    async fn delete_one(
        &self,
        collection: CollectionName,
        filter: Document,
    ) -> Result<DeleteOutcome, StoreError> {
        let mut collections = self.collections.write().await;
        let deleted_count = match collections.get_mut(&collection) {
            Some(documents) => match documents.iter().position(|d| filter_matches(d, &filter)) {
                Some(index) => {
                    documents.remove(index);
                    1
                }
                None => 0,
            },
            None => 0,
        };

        Ok(DeleteOutcome { deleted_count })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

fn immutable_id() -> StoreError {
    StoreError::InvalidUpdate(
        "Performing an update on the path '_id' would modify the immutable field '_id'"
            .to_string(),
    )
}

/// Put a fresh ObjectId first when the document has no `_id`.
fn with_id(document: Document) -> Document {
    if document.contains_key("_id") {
        return document;
    }

    let mut with_id = Document::new();
    with_id.insert("_id", ObjectId::new());
    for (key, value) in document {
        with_id.insert(key, value);
    }
    with_id
}

fn filter_matches(document: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, expected)| match document.get(key) {
        Some(actual) => values_equal(actual, expected),
        None => matches!(expected, Bson::Null),
    })
}

fn values_equal(a: &Bson, b: &Bson) -> bool {
    match (as_number(a), as_number(b)) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(n) => Some(f64::from(*n)),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(n) => Some(*n),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn insert_assigns_object_id_first() {
        let store = MemoryStore::new();
        let outcome = store
            .insert_one(CollectionName::Food, doc! { "name": "Rice" })
            .await
            .unwrap();

        assert!(matches!(outcome.inserted_id, Bson::ObjectId(_)));

        let stored = store
            .find(CollectionName::Food, Document::new())
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].keys().next().map(String::as_str), Some("_id"));
    }

    #[tokio::test]
    async fn insert_keeps_caller_id_and_rejects_duplicates() {
        let store = MemoryStore::new();
        store
            .insert_one(CollectionName::Request, doc! { "_id": "custom" })
            .await
            .unwrap();

        let err = store
            .insert_one(CollectionName::Request, doc! { "_id": "custom" })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey(_)));
    }

    #[tokio::test]
    async fn collections_are_isolated() {
        let store = MemoryStore::new();
        store
            .insert_one(CollectionName::Food, doc! { "name": "Rice" })
            .await
            .unwrap();

        let requests = store
            .find(CollectionName::Request, Document::new())
            .await
            .unwrap();
        assert!(requests.is_empty());
    }

    #[tokio::test]
    async fn find_filters_by_equality() {
        let store = MemoryStore::new();
        for status in ["pending", "delivered", "pending"] {
            store
                .insert_one(CollectionName::Request, doc! { "status": status })
                .await
                .unwrap();
        }

        let pending = store
            .find(CollectionName::Request, doc! { "status": "pending" })
            .await
            .unwrap();
        assert_eq!(pending.len(), 2);

        let missing = store
            .find(CollectionName::Request, doc! { "email": Bson::Null })
            .await
            .unwrap();
        assert_eq!(missing.len(), 3);
    }

    #[test]
    fn numbers_compare_by_value() {
        assert!(values_equal(&Bson::Int32(5), &Bson::Int64(5)));
        assert!(values_equal(&Bson::Double(5.0), &Bson::Int32(5)));
        assert!(!values_equal(&Bson::String("5".into()), &Bson::Int32(5)));
    }

    #[tokio::test]
    async fn update_reports_modified_only_on_change() {
        let store = MemoryStore::new();
        let id = store
            .insert_one(CollectionName::Request, doc! { "status": "pending" })
            .await
            .unwrap()
            .inserted_id;

        let changed = store
            .update_one(
                CollectionName::Request,
                doc! { "_id": id.clone() },
                doc! { "status": "delivered" },
                false,
            )
            .await
            .unwrap();
        assert_eq!((changed.matched_count, changed.modified_count), (1, 1));

        let unchanged = store
            .update_one(
                CollectionName::Request,
                doc! { "_id": id },
                doc! { "status": "delivered" },
                false,
            )
            .await
            .unwrap();
        assert_eq!((unchanged.matched_count, unchanged.modified_count), (1, 0));
    }

    #[tokio::test]
    async fn update_without_match_or_upsert_is_a_no_op() {
        let store = MemoryStore::new();
        let outcome = store
            .update_one(
                CollectionName::Request,
                doc! { "_id": ObjectId::new() },
                doc! { "status": "delivered" },
                false,
            )
            .await
            .unwrap();

        assert_eq!(outcome.matched_count, 0);
        assert!(outcome.upserted_id.is_none());
        assert!(store
            .find(CollectionName::Request, Document::new())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn upsert_seeds_from_filter() {
        let store = MemoryStore::new();
        let id = ObjectId::new();
        let outcome = store
            .update_one(
                CollectionName::Food,
                doc! { "_id": id },
                doc! { "name": "Rice", "price": Bson::Null },
                true,
            )
            .await
            .unwrap();

        assert_eq!(outcome.upserted_id, Some(Bson::ObjectId(id)));

        let stored = store
            .find_one(CollectionName::Food, doc! { "_id": id })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.get_str("name").unwrap(), "Rice");
        assert_eq!(stored.get("price"), Some(&Bson::Null));
    }

    #[tokio::test]
    async fn empty_set_is_rejected() {
        let store = MemoryStore::new();
        let err = store
            .update_one(
                CollectionName::Request,
                doc! { "_id": ObjectId::new() },
                Document::new(),
                false,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidUpdate(_)));
    }

    #[tokio::test]
    async fn changing_id_is_rejected() {
        let store = MemoryStore::new();
        let id = store
            .insert_one(CollectionName::Request, doc! { "status": "pending" })
            .await
            .unwrap()
            .inserted_id;

        let err = store
            .update_one(
                CollectionName::Request,
                doc! { "_id": id },
                doc! { "_id": ObjectId::new() },
                false,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidUpdate(_)));
    }

    #[tokio::test]
    async fn delete_removes_first_match_only() {
        let store = MemoryStore::new();
        for _ in 0..2 {
            store
                .insert_one(CollectionName::Request, doc! { "status": "pending" })
                .await
                .unwrap();
        }

        let outcome = store
            .delete_one(CollectionName::Request, doc! { "status": "pending" })
            .await
            .unwrap();
        assert_eq!(outcome.deleted_count, 1);

        let left = store
            .find(CollectionName::Request, Document::new())
            .await
            .unwrap();
        assert_eq!(left.len(), 1);

        let outcome = store
            .delete_one(CollectionName::Food, doc! { "status": "pending" })
            .await
            .unwrap();
        assert_eq!(outcome.deleted_count, 0);
    }
}
