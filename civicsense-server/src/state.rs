//! Application state shared across handlers

use crate::db::Gateway;

/// Shared application state
#[derive(Clone, Debug)]
pub struct AppState {
    pub gateway: Gateway,
}

impl AppState {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }
}
