//! Route handlers organized by resource

pub mod health;
pub mod missions;
pub mod register;
pub mod scores;
pub mod users;
