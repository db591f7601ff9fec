//! Gateway configuration - environment loading
//!
//! Configuration is loaded from environment variables:
//! - `MONGODB_USERNAME` / `MONGODB_PASSWORD`: Atlas credentials
//! - `MONGODB_URI`: full connection string, overrides the Atlas URI
//! - `MONGODB_DATABASE`: database name (default: shareeats)
//! - `PORT`: listening port (default: 5000)
//! - `CORS_ORIGINS`: comma-separated allowed origins

use std::env;

use crate::db::DEFAULT_DATABASE;

/// Atlas cluster the credentials belong to
pub const ATLAS_HOST: &str = "cluster0.iitamdp.mongodb.net";

pub const DEFAULT_PORT: u16 = 5000;

pub const DEFAULT_ORIGINS: [&str; 2] = ["https://b8a11.netlify.app", "http://localhost:5173"];

/// Database connection settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    pub database: String,
}

impl DatabaseConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let uri = env::var("MONGODB_URI").unwrap_or_else(|_| {
            let username = env::var("MONGODB_USERNAME").unwrap_or_else(|_| {
                tracing::warn!("MONGODB_USERNAME not set");
                String::new()
            });
            let password = env::var("MONGODB_PASSWORD").unwrap_or_else(|_| {
                tracing::warn!("MONGODB_PASSWORD not set");
                String::new()
            });
            atlas_uri(&username, &password)
        });

        let database =
            env::var("MONGODB_DATABASE").unwrap_or_else(|_| DEFAULT_DATABASE.to_string());

        Self { uri, database }
    }

    /// Connection string with the password masked, for logs.
    pub fn redacted_uri(&self) -> String {
        redact(&self.uri)
    }
}

/// Atlas SRV connection string for the given credentials.
pub fn atlas_uri(username: &str, password: &str) -> String {
    format!(
        "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority",
        username, password, ATLAS_HOST
    )
}

fn redact(uri: &str) -> String {
    let Some((scheme, rest)) = uri.split_once("://") else {
        return uri.to_string();
    };
    let Some((credentials, host)) = rest.rsplit_once('@') else {
        return uri.to_string();
    };

    match credentials.split_once(':') {
        Some((user, _)) => format!("{}://{}:****@{}", scheme, user, host),
        None => uri.to_string(),
    }
}

/// `PORT`, falling back to 5000 when unset or unparsable
pub fn port_from_env() -> u16 {
    match env::var("PORT") {
        Ok(value) => value.trim().parse().unwrap_or_else(|e| {
            tracing::warn!("Invalid PORT value '{}': {}, using {}", value, e, DEFAULT_PORT);
            DEFAULT_PORT
        }),
        Err(_) => DEFAULT_PORT,
    }
}

/// `CORS_ORIGINS`, falling back to the two known frontends
pub fn origins_from_env() -> Vec<String> {
    env::var("CORS_ORIGINS")
        .ok()
        .map(|value| parse_origins(&value))
        .filter(|origins| !origins.is_empty())
        .unwrap_or_else(|| DEFAULT_ORIGINS.iter().map(|o| o.to_string()).collect())
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
