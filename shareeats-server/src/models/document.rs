//! Document helpers at the HTTP boundary
//!
//! Bodies come in as plain JSON objects and are stored as `bson::Document`
//! without any extended-JSON reading: `{"$oid": ...}` stays an object.
//! Documents go out as JSON. ObjectIds render as bare hex strings, which is
//! what browser clients of this API have always received; everything else
//! uses relaxed extended JSON.

use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use serde_json::{Map, Number, Value};

/// Parse a path segment into an ObjectId.
pub fn parse_object_id(id: &str) -> Result<ObjectId, mongodb::bson::oid::Error> {
    ObjectId::parse_str(id)
}

/// `{ _id: <id> }`
pub fn id_filter(id: ObjectId) -> Document {
    doc! { "_id": id }
}

/// Build an equality filter from query-string pairs. Values stay strings;
/// a repeated key keeps its last value.
pub fn filter_from_query(pairs: Vec<(String, String)>) -> Document {
    let mut filter = Document::new();
    for (key, value) in pairs {
        filter.insert(key, Bson::String(value));
    }
    filter
}

/// Store a JSON value as BSON, field for field.
///
/// Integers use `Int32` when they fit and `Int64` otherwise; integers past
/// the `i64` range become doubles.
pub fn json_to_bson(value: Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(b),
        Value::Number(n) => number_to_bson(&n),
        Value::String(s) => Bson::String(s),
        Value::Array(items) => Bson::Array(items.into_iter().map(json_to_bson).collect()),
        Value::Object(map) => Bson::Document(object_to_document(map)),
    }
}

/// Store a JSON object as a document, keeping key order.
pub fn object_to_document(map: Map<String, Value>) -> Document {
    map.into_iter()
        .map(|(key, value)| (key, json_to_bson(value)))
        .collect()
}

fn number_to_bson(n: &Number) -> Bson {
    match n.as_i64() {
        Some(i) => i32::try_from(i).map_or(Bson::Int64(i), Bson::Int32),
        None => Bson::Double(n.as_f64().unwrap_or(f64::NAN)),
    }
}

pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Document(document) => document_to_json(document),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

pub fn document_to_json(document: Document) -> Value {
    let map: Map<String, Value> = document
        .into_iter()
        .map(|(key, value)| (key, bson_to_json(value)))
        .collect();
    Value::Object(map)
}

pub fn documents_to_json(documents: Vec<Document>) -> Value {
    Value::Array(documents.into_iter().map(document_to_json).collect())
}
