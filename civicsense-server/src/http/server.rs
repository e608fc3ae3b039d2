//! Axum server setup
//!
//! Server skeleton with:
//! - CORS, permissive unless configured for localhost only
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::config::ServerConfig;
use crate::db;
use crate::state::AppState;

/// Origins allowed when CORS is not permissive: the game client dev server and the API itself
const LOCAL_ORIGINS: [&str; 4] = [
    "http://localhost:5173",
    "http://127.0.0.1:5173",
    "http://localhost:5001",
    "http://127.0.0.1:5001",
];

fn cors_layer(permissive: bool) -> CorsLayer {
    if permissive {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(LOCAL_ORIGINS.map(HeaderValue::from_static))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Build the application router with all routes.
///
/// Game endpoints live under `/api`; `/health` sits at the root.
pub fn build_router(state: AppState, cors_permissive: bool) -> Router {
    let api = Router::new()
        .merge(routes::register::router())
        .merge(routes::users::router())
        .merge(routes::missions::router())
        .merge(routes::scores::router());

    Router::new()
        .merge(routes::health::router())
        .nest("/api", api)
        .layer(cors_layer(cors_permissive))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server.
///
/// Connects the user store once, then serves until a shutdown signal.
/// A store that cannot be reached does not stop startup; endpoints that
/// need it answer 500 instead.
///
/// # Example
///
/// ```ignore
/// run_server(ServerConfig::from_env()).await?;
/// ```
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let gateway = db::connect(&config).await;

    if config.cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
    }
    let app = build_router(AppState::new(gateway), config.cors_permissive);

    // Bind listener
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    // Run with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
}
