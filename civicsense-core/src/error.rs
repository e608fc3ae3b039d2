//! Validation errors for user input
//!
//! Messages are returned verbatim to API clients and shown by the game
//! client, so keep their wording stable.

use thiserror::Error;

/// Input rejected before it reaches storage
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field absent or empty
    #[error("{}", missing_message(.field))]
    Missing { field: &'static str },

    /// Field present but not in the expected shape
    #[error("Invalid {} format. {hint}", field_label(.field))]
    InvalidFormat {
        field: &'static str,
        hint: &'static str,
    },

    /// Date of birth lies after today
    #[error("DOB cannot be in the future")]
    FutureDob,

    /// Level outside 1..=5
    #[error("level must be between 1 and 5, got {0}")]
    LevelOutOfRange(i64),

    /// Unknown civic score category name
    #[error("unknown score category '{0}'")]
    UnknownCategory(String),

    /// A recognised category carried something other than an integer
    #[error("score for {0} must be an integer")]
    NonIntegerScore(&'static str),

    /// scores_earned had entries but none with a recognised category
    #[error("Invalid score categories")]
    NoRecognizedCategories,

    /// Request body could not be decoded
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
}

impl ValidationError {
    pub fn missing(field: &'static str) -> Self {
        Self::Missing { field }
    }

    pub fn invalid_format(field: &'static str, hint: &'static str) -> Self {
        Self::InvalidFormat { field, hint }
    }
}

fn field_label(field: &str) -> &str {
    match field {
        "dob" => "DOB",
        "level" => "Level",
        other => other,
    }
}

fn missing_message(field: &str) -> String {
    match field {
        "level" => "Level parameter required".to_string(),
        "user_id" | "scores_earned" => "user_id and scores_earned are required".to_string(),
        other => format!("{} is required", field_label(other)),
    }
}
