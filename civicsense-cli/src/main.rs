//! civicsense CLI - runs the CivicSense game backend
//!
//! - `serve`: start the HTTP API
//! - `migrate`: create the Postgres schema and exit

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "civicsense",
    author,
    version,
    about = "Backend for the CivicSense children's civic education game"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::ServeArgs),

    /// Create the users table if missing
    Migrate(commands::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is normal
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
    }

    Ok(())
}
