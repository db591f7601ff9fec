//! Write results as clients see them
//!
//! Field names and shapes follow the driver result objects the frontend
//! already consumes (`insertedId`, `modifiedCount`, ...).

use serde::Serialize;
use serde_json::Value;

use super::document::bson_to_json;
use crate::db::{DeleteOutcome, InsertOutcome, UpdateOutcome};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub acknowledged: bool,
    pub inserted_id: Value,
}

impl From<InsertOutcome> for InsertResult {
    fn from(outcome: InsertOutcome) -> Self {
        Self {
            acknowledged: true,
            inserted_id: bson_to_json(outcome.inserted_id),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<Value>,
}

impl From<UpdateOutcome> for UpdateResult {
    fn from(outcome: UpdateOutcome) -> Self {
        Self {
            acknowledged: true,
            matched_count: outcome.matched_count,
            modified_count: outcome.modified_count,
            upserted_count: u64::from(outcome.upserted_id.is_some()),
            upserted_id: outcome.upserted_id.map(bson_to_json),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl From<DeleteOutcome> for DeleteResult {
    fn from(outcome: DeleteOutcome) -> Self {
        Self {
            acknowledged: true,
            deleted_count: outcome.deleted_count,
        }
    }
}
