//! Serve command - run the HTTP API

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use civicsense_server::{run_server, ServerConfig, StoreBackend};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:5001)
    #[arg(long, short = 'b', env = "CIVICSENSE_BIND")]
    pub bind: Option<SocketAddr>,

    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, env = "CIVICSENSE_MAX_CONNECTIONS")]
    pub max_connections: Option<u32>,

    /// Keep users in memory instead of Postgres (lost on exit)
    #[arg(long)]
    pub memory: bool,

    /// Only allow local development origins instead of any origin
    #[arg(long)]
    pub cors_localhost: bool,
}

impl ServeArgs {
    fn into_config(self) -> ServerConfig {
        let mut config = ServerConfig::from_env();
        if let Some(bind) = self.bind {
            config.bind_addr = bind;
        }
        if let Some(url) = self.database_url {
            config.database_url = url;
        }
        if let Some(max) = self.max_connections {
            config.max_connections = max;
        }
        if self.memory {
            config.backend = StoreBackend::Memory;
        }
        config.cors_permissive = !self.cors_localhost;
        config
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.into_config();
    tracing::info!(backend = ?config.backend, "Starting civicsense server on {}", config.bind_addr);

    // Run server (blocks until shutdown)
    run_server(config).await.context("Server error")?;

    Ok(())
}
