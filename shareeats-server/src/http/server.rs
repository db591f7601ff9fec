//! Axum server setup
//!
//! Server skeleton with:
//! - CORS restricted to the known frontends
//! - Tracing middleware
//! - Connectivity ping that logs but never blocks startup
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::config::{DEFAULT_ORIGINS, DEFAULT_PORT};
use crate::db::DocumentStore;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:5000)
    pub bind_addr: SocketAddr,

    /// Origins allowed to call the API from a browser
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            allowed_origins: DEFAULT_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn DocumentStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }
}

/// CORS for the configured origins, methods GET/POST/PUT/PATCH/DELETE.
/// Whatever headers a preflight asks for are allowed.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, ServerError> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ServerError::InvalidOrigin(origin.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(AllowHeaders::mirror_request()))
}

/// Build the application router with all routes.
pub fn build_router(state: AppState, config: &ServerConfig) -> Result<Router, ServerError> {
    let cors = cors_layer(&config.allowed_origins)?;

    Ok(Router::new()
        .merge(routes::health::router())
        .merge(routes::food::router())
        .merge(routes::requests::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state)))
}

/// Run the HTTP server.
///
/// The store is pinged in the background. A failed ping is logged and the
/// server keeps running; routes then fail on their first database call.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(MongoStore::connect(&uri, DEFAULT_DATABASE).await?);
/// run_server(store, ServerConfig::default()).await?;
/// ```
pub async fn run_server(
    store: Arc<dyn DocumentStore>,
    config: ServerConfig,
) -> Result<(), ServerError> {
    let app = build_router(AppState::new(store.clone()), &config)?;

    tokio::spawn(report_connectivity(store));

    // Bind listener
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server is running on port: {}", config.bind_addr.port());

    // Run with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Ping the deployment once and log the outcome.
pub async fn report_connectivity(store: Arc<dyn DocumentStore>) {
    match store.ping().await {
        Ok(()) => {
            tracing::info!("Pinged your deployment. You successfully connected to MongoDB!")
        }
        Err(e) => tracing::error!("MongoDB connection error: {}", e),
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid CORS origin: {0}")]
    InvalidOrigin(String),
}
