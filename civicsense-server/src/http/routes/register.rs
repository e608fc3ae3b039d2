//! Registration endpoint

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chrono::Utc;
use civicsense_core::{parse_dob, Level, UserRecord};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::state::AppState;

/// Register request
#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub dob: Option<String>,
}

/// Register response
#[derive(Serialize)]
pub struct RegisterResponse {
    pub user_id: String,
    pub age: u32,
    pub current_level: Level,
}

impl From<&UserRecord> for RegisterResponse {
    fn from(user: &UserRecord) -> Self {
        Self {
            user_id: user.user_id.clone(),
            age: user.age,
            current_level: user.current_level,
        }
    }
}

/// POST /register - create a user from a date of birth
async fn register(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let now = Utc::now();
    let dob = parse_dob(req.dob.as_deref().unwrap_or_default(), now.date_naive())?;

    let store = state.gateway.store()?;
    let user = UserRecord::register(dob, now);
    store.insert(&user).await?;

    tracing::info!(
        user_id = %user.user_id,
        age = user.age,
        level = %user.current_level,
        "Registered user"
    );

    Ok((StatusCode::CREATED, Json(RegisterResponse::from(&user))))
}

/// Registration routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/register", post(register))
}
