//! shareeats-server: HTTP gateway for food listings and requests
//!
//! Every route maps to a single MongoDB operation on the `food` or
//! `request` collection. The store sits behind [`db::DocumentStore`] and is
//! injected through axum state, so tests run against [`db::MemoryStore`].

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::DatabaseConfig;
pub use db::{DocumentStore, MemoryStore, MongoStore, StoreError, UnavailableStore};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
