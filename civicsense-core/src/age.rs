//! Age and difficulty level derivation
//!
//! Levels are a step function of age in whole years. A stored level goes
//! stale as the child gets older; [`needs_reevaluation`] decides when a
//! stored record is old enough to recompute.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Days that must elapse before age and level are recomputed on read.
pub const REEVALUATION_INTERVAL_DAYS: i64 = 365;

/// Whole years elapsed between `dob` and `today`.
///
/// The year difference is reduced by one when `today` falls before the
/// birthday in the current year. A `dob` later than `today` yields 0.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use civicsense_core::calculate_age;
///
/// let dob = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// assert_eq!(calculate_age(dob, today), 4);
/// ```
pub fn calculate_age(dob: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}

/// Map an age to its difficulty level.
///
/// | age   | level |
/// |-------|-------|
/// | 0-3   | 1     |
/// | 4-6   | 2     |
/// | 7-8   | 3     |
/// | 9-10  | 4     |
/// | 11+   | 5     |
pub fn map_age_to_level(age: u32) -> Level {
    let level = match age {
        0..=3 => 1,
        4..=6 => 2,
        7..=8 => 3,
        9..=10 => 4,
        _ => 5,
    };
    Level(level)
}

/// True once a full re-evaluation interval has passed since `last_update`.
pub fn needs_reevaluation(last_update: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    (now - last_update).num_days() >= REEVALUATION_INTERVAL_DAYS
}

/// Difficulty tier, always within 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const MIN: Level = Level(1);
    pub const MAX: Level = Level(5);

    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if (i64::from(Self::MIN.0)..=i64::from(Self::MAX.0)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::LevelOutOfRange(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Level {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
