//! HTTP server command
//!
//! Builds the document store and runs the gateway until shutdown.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use shareeats_server::config::{origins_from_env, port_from_env};
use shareeats_server::{
    run_server, DatabaseConfig, DocumentStore, MemoryStore, MongoStore, ServerConfig,
    UnavailableStore,
};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to listen on (default: $PORT or 5000)
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// MongoDB connection string (default: Atlas URI built from MONGODB_USERNAME/MONGODB_PASSWORD)
    #[arg(long, env = "MONGODB_URI", hide_env_values = true)]
    pub mongodb_uri: Option<String>,

    /// Database name (default: $MONGODB_DATABASE or shareeats)
    #[arg(long)]
    pub database: Option<String>,

    /// Allowed CORS origin, repeatable (default: $CORS_ORIGINS or the deployed frontends)
    #[arg(long = "cors-origin", value_name = "ORIGIN")]
    pub cors_origins: Vec<String>,

    /// Keep documents in process memory instead of MongoDB (ignores connection settings)
    #[arg(long)]
    pub in_memory: bool,

    /// Exit if the database cannot be reached at startup
    #[arg(long, env = "REQUIRE_DATABASE")]
    pub require_database: bool,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        let port = self.port.unwrap_or_else(port_from_env);
        let allowed_origins = if self.cors_origins.is_empty() {
            origins_from_env()
        } else {
            self.cors_origins.clone()
        };

        ServerConfig {
            bind_addr: SocketAddr::new(self.host, port),
            allowed_origins,
        }
    }

    fn database_config(&self) -> DatabaseConfig {
        let mut config = DatabaseConfig::from_env();
        if let Some(uri) = &self.mongodb_uri {
            config.uri = uri.clone();
        }
        if let Some(database) = &self.database {
            config.database = database.clone();
        }
        config
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.server_config();
    tracing::info!(
        bind = %config.bind_addr,
        origins = ?config.allowed_origins,
        "Starting shareeats server"
    );

    let store = build_store(&args).await?;

    if args.require_database {
        store
            .ping()
            .await
            .context("MongoDB ping failed and --require-database is set")?;
    }

    // Run server (blocks until shutdown)
    run_server(store, config).await.context("Server error")?;

    Ok(())
}

async fn build_store(args: &ServeArgs) -> Result<Arc<dyn DocumentStore>> {
    if args.in_memory {
        tracing::warn!("Using in-memory store - documents are lost on exit");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let database = args.database_config();
    tracing::info!(
        uri = %database.redacted_uri(),
        database = %database.database,
        "Creating MongoDB client"
    );

    match MongoStore::connect(&database.uri, &database.database).await {
        Ok(store) => Ok(Arc::new(store)),
        Err(e) if args.require_database => {
            Err(e).context("Failed to create MongoDB client")
        }
        Err(e) => {
            tracing::error!("MongoDB connection error: {}", e);
            Ok(Arc::new(UnavailableStore::new(e.to_string())))
        }
    }
}
