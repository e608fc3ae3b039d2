//! Mission catalog endpoint

use std::sync::Arc;

use axum::{extract::Query, routing::get, Json, Router};
use civicsense_core::{missions_for_level, Mission, ValidationError};
use serde::Deserialize;

use crate::http::error::ApiError;
use crate::state::AppState;

/// Query string for GET /missions
///
/// `level` is kept as text so a bad value becomes a JSON 400 rather than
/// axum's plain-text query rejection.
#[derive(Deserialize)]
pub struct MissionsParams {
    pub level: Option<String>,
}

impl MissionsParams {
    fn level(&self) -> Result<i64, ValidationError> {
        let raw = self
            .level
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ValidationError::missing("level"))?;

        raw.parse()
            .map_err(|_| ValidationError::invalid_format("level", "Use an integer"))
    }
}

/// GET /missions?level=N - missions available at a level
async fn list_missions(
    Query(params): Query<MissionsParams>,
) -> Result<Json<Vec<Mission>>, ApiError> {
    let level = params.level()?;
    Ok(Json(missions_for_level(level)))
}

/// Mission routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/missions", get(list_missions))
}
