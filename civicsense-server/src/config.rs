//! Server configuration
//!
//! Loaded from environment variables, then overridden by CLI flags:
//! - `DATABASE_URL`: Postgres connection string (default: postgres://localhost/civicsense)
//! - `CIVICSENSE_BIND`: listen address (default: 127.0.0.1:5001)
//! - `CIVICSENSE_MAX_CONNECTIONS`: pool size (default: 5)

use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/civicsense";

/// Default maximum connections for the Postgres pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Where user records live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Postgres,
    /// Process-local map, lost on exit
    Memory,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:5001)
    pub bind_addr: SocketAddr,

    /// Postgres connection string
    pub database_url: String,

    /// Pool size for the Postgres backend
    pub max_connections: u32,

    /// Allow any origin (default: true). When false only local dev origins pass.
    pub cors_permissive: bool,

    pub backend: StoreBackend,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5001)),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            cors_permissive: true,
            backend: StoreBackend::Postgres,
        }
    }
}

impl ServerConfig {
    /// Create config from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            bind_addr: env_parse("CIVICSENSE_BIND").unwrap_or(defaults.bind_addr),
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections: env_parse("CIVICSENSE_MAX_CONNECTIONS")
                .unwrap_or(defaults.max_connections),
            ..defaults
        }
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring unparseable environment variable");
            None
        }
    }
}
