//! Civic score update endpoint

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use civicsense_core::{CivicScores, ScoreDeltas, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::state::AppState;

/// Score update request
#[derive(Deserialize)]
pub struct ScoreUpdateRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    /// Recorded in logs only
    #[serde(default)]
    pub mission_id: Option<String>,
    /// Values stay untyped so unknown categories can be dropped before
    /// anything is required of them.
    #[serde(default)]
    pub scores_earned: Option<Map<String, Value>>,
}

/// Score update response
#[derive(Serialize)]
pub struct ScoreUpdateResponse {
    pub message: &'static str,
    pub civic_scores: CivicScores,
}

/// POST /score/update - add earned points to a user's civic scores
async fn update_scores(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<ScoreUpdateRequest>,
) -> Result<Json<ScoreUpdateResponse>, ApiError> {
    let user_id = req
        .user_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ValidationError::missing("user_id"))?;
    let earned = req.scores_earned.unwrap_or_default();
    let deltas = ScoreDeltas::from_values(earned.iter().map(|(name, value)| (name, value.as_i64())))?;

    let store = state.gateway.store()?;
    let civic_scores = store
        .increment_scores(&user_id, &deltas)
        .await?
        .ok_or_else(|| ApiError::user_not_found(&user_id))?;

    tracing::info!(
        user_id = %user_id,
        mission_id = req.mission_id.as_deref().unwrap_or("-"),
        categories = deltas.len(),
        "Updated civic scores"
    );

    Ok(Json(ScoreUpdateResponse {
        message: "Scores updated successfully",
        civic_scores,
    }))
}

/// Score routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/score/update", post(update_scores))
}
