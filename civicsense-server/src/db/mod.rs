//! Persistence gateway - user store trait and backends
//!
//! # Design Principles
//!
//! - One handle built at startup and injected, never a global
//! - Every per-record mutation is a single atomic statement
//! - A failed startup connection leaves the gateway unavailable for the
//!   life of the process

pub mod gateway;
pub mod memory;
pub mod migrations;
pub mod postgres;
pub mod store;

pub use gateway::{connect, create_pool, Gateway};
pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;
pub use store::{StoreError, UserStore};
