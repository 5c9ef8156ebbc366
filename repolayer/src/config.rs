//! Environment-backed configuration.
//!
//! The key set is fixed and small, so configuration is a plain struct with
//! direct field access, resolved once at startup. Missing variables resolve
//! to empty strings and are logged, not fatal; only the connection string's
//! absence later causes connector failure.

use tracing::warn;

/// The three service properties plus the database-name override.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Listening port for the transport layer (unused by the core).
    pub port: String,
    /// Secret key for the transport layer (unused by the core).
    pub secret_key: String,
    /// Store connection string.
    pub database_url: String,
    /// Database name; empty selects the connector's default.
    pub database_name: String,
}

impl Config {
    /// Reads configuration from the process environment, with an optional
    /// local `.env` override file loaded first.
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_err() {
            warn!(".env file not found, using process environment only");
        }

        Self {
            port: read_var("PORT"),
            secret_key: read_var("SECRET_KEY"),
            database_url: read_var("MONGODB_URL"),
            database_name: read_var("DATABASE_NAME"),
        }
    }
}

fn read_var(key: &str) -> String {
    match std::env::var(key) {
        Ok(value) => value,
        Err(_) => {
            warn!(key, "environment variable not set, defaulting to empty");
            String::new()
        }
    }
}
