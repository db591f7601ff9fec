//! Document models and the helpers that shape them for HTTP

pub mod document;
pub mod food;
pub mod quantity;
pub mod results;

pub use document::{
    bson_to_json, document_to_json, documents_to_json, filter_from_query, id_filter,
    json_to_bson, object_to_document, parse_object_id,
};
pub use food::FoodUpdate;
pub use quantity::{compare_by_quantity, sort_by_quantity, QUANTITY_FIELD};
pub use results::{DeleteResult, InsertResult, UpdateResult};
