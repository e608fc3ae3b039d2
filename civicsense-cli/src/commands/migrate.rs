//! Migrate command - create the schema without starting the server

use anyhow::{Context, Result};
use clap::Parser;
use civicsense_server::config::{DEFAULT_DATABASE_URL, DEFAULT_MAX_CONNECTIONS};
use civicsense_server::db::{create_pool, migrations};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,
}

/// Run schema migrations
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = create_pool(&args.database_url, DEFAULT_MAX_CONNECTIONS)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    pool.close().await;
    Ok(())
}
