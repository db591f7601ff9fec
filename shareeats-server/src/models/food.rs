//! Typed view of the food fields the upsert route touches

use mongodb::bson::{doc, Bson, Document};
use serde::Deserialize;
use serde_json::Value;

use super::document::json_to_bson;

/// Body of `PUT /updatefood/{id}`.
///
/// Only these four fields are written. A field missing from the body is
/// still written, as `null`. Any other field in the body is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct FoodUpdate {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub image: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
}

impl FoodUpdate {
    /// The `$set` payload, always carrying all four keys.
    pub fn into_set(self) -> Document {
        doc! {
            "name": self.name.map_or(Bson::Null, json_to_bson),
            "image": self.image.map_or(Bson::Null, json_to_bson),
            "price": self.price.map_or(Bson::Null, json_to_bson),
            "description": self.description.map_or(Bson::Null, json_to_bson),
        }
    }
}
