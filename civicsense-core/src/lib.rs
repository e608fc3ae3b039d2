//! civicsense-core: domain model for the CivicSense game backend
//!
//! Pure logic only. Nothing in this crate performs I/O; the server crate
//! wires these types to HTTP and storage.

pub mod age;
pub mod error;
pub mod missions;
pub mod scores;
pub mod user;

pub use age::{calculate_age, map_age_to_level, needs_reevaluation, Level};
pub use error::ValidationError;
pub use missions::{missions_for_level, Mission};
pub use scores::{Category, CivicScores, ScoreDeltas};
pub use user::{parse_dob, UserRecord};
