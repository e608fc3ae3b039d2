//! Startup connection and the injected store handle

use std::fmt;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::memory::MemoryUserStore;
use super::postgres::PgUserStore;
use super::store::{StoreError, UserStore};
use super::migrations;
use crate::config::{ServerConfig, StoreBackend};

/// Handle to the user store, possibly unavailable
#[derive(Clone, Default)]
pub struct Gateway {
    store: Option<Arc<dyn UserStore>>,
}

impl Gateway {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store: Some(store) }
    }

    pub fn connected<S: UserStore + 'static>(store: S) -> Self {
        Self::new(Arc::new(store))
    }

    /// Gateway whose every access fails with [`StoreError::Unavailable`].
    pub fn unavailable() -> Self {
        Self { store: None }
    }

    pub fn is_connected(&self) -> bool {
        self.store.is_some()
    }

    pub fn store(&self) -> Result<&dyn UserStore, StoreError> {
        self.store.as_deref().ok_or(StoreError::Unavailable)
    }
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("connected", &self.is_connected())
            .finish()
    }
}

/// Build the gateway for `config`.
///
/// Connection or migration failures are logged and yield an unavailable
/// gateway; there is no reconnect.
pub async fn connect(config: &ServerConfig) -> Gateway {
    match config.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory user store - records are lost on exit");
            Gateway::connected(MemoryUserStore::new())
        }
        StoreBackend::Postgres => {
            match connect_postgres(&config.database_url, config.max_connections).await {
                Ok(store) => {
                    tracing::info!("Connected to Postgres user store");
                    Gateway::connected(store)
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to connect to user store, persistence disabled");
                    Gateway::unavailable()
                }
            }
        }
    }
}

/// Open a Postgres pool of at most `max_connections`.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

async fn connect_postgres(database_url: &str, max_connections: u32) -> Result<PgUserStore, StoreError> {
    let pool = create_pool(database_url, max_connections).await?;

    // Verify connection
    sqlx::query("SELECT 1").execute(&pool).await?;
    migrations::run(&pool).await?;

    Ok(PgUserStore::new(pool))
}
