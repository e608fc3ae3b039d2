//! User record and registration

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::age::{calculate_age, map_age_to_level, needs_reevaluation, Level};
use crate::scores::CivicScores;
use crate::ValidationError;

/// Wire format for dates of birth
pub const DOB_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date of birth, rejecting empty input and dates after `today`.
///
/// The string must match the format exactly; surrounding whitespace is rejected.
pub fn parse_dob(raw: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::missing("dob"));
    }

    let invalid = || ValidationError::invalid_format("dob", "Use YYYY-MM-DD");
    // chrono skips leading whitespace before numeric fields
    if raw.trim() != raw {
        return Err(invalid());
    }
    let dob = NaiveDate::parse_from_str(raw, DOB_FORMAT).map_err(|_| invalid())?;

    if dob > today {
        return Err(ValidationError::FutureDob);
    }
    Ok(dob)
}

/// One registered player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: String,
    pub dob: NaiveDate,
    pub age: u32,
    pub current_level: Level,
    pub last_level_update_date: DateTime<Utc>,
    pub civic_scores: CivicScores,
}

impl UserRecord {
    /// Fresh record with a generated id, zeroed scores and age/level as of `now`.
    pub fn register(dob: NaiveDate, now: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), dob, now)
    }

    pub fn with_id(user_id: impl Into<String>, dob: NaiveDate, now: DateTime<Utc>) -> Self {
        let age = calculate_age(dob, now.date_naive());
        Self {
            user_id: user_id.into(),
            dob,
            age,
            current_level: map_age_to_level(age),
            last_level_update_date: now,
            civic_scores: CivicScores::default(),
        }
    }

    /// Recompute age and level if the last update is a year or more old.
    ///
    /// Returns true when the record changed and must be written back.
    pub fn reevaluate(&mut self, now: DateTime<Utc>) -> bool {
        if !needs_reevaluation(self.last_level_update_date, now) {
            return false;
        }
        self.age = calculate_age(self.dob, now.date_naive());
        self.current_level = map_age_to_level(self.age);
        self.last_level_update_date = now;
        true
    }
}
