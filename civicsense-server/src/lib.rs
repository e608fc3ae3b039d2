//! civicsense-server: HTTP API for the CivicSense game
//!
//! Four JSON endpoints under `/api` (register, user lookup, missions,
//! score updates) plus a `/health` check. The user store is connected
//! once at startup and handed to handlers through [`AppState`].

pub mod config;
pub mod db;
pub mod http;
pub mod state;

pub use config::{ServerConfig, StoreBackend};
pub use db::{Gateway, MemoryUserStore, PgUserStore, StoreError, UserStore};
pub use http::{build_router, run_server, ApiError, ServerError};
pub use state::AppState;
