//! Database layer - storage seam, backends and repositories
//!
//! - `DocumentStore` is the only thing handlers depend on
//! - `MongoStore` talks to the deployment through one shared client
//! - `MemoryStore` backs tests and local runs
//! - `UnavailableStore` stands in when no client could be built

pub mod memory;
pub mod mongo;
pub mod repos;
pub mod store;
pub mod unavailable;

pub use memory::MemoryStore;
pub use mongo::{create_client, MongoStore, DEFAULT_DATABASE};
pub use repos::*;
pub use store::{
    CollectionName, DeleteOutcome, DocumentStore, InsertOutcome, StoreError, UpdateOutcome,
};
pub use unavailable::UnavailableStore;
