//! Liveness endpoint

use axum::{routing::get, Router};

/// GET /
async fn hello() -> &'static str {
    "Hello World!"
}

/// Liveness routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(hello))
}
