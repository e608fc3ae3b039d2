//! User lookup endpoint
//!
//! Reading a user is also when a stale age/level gets recomputed.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use civicsense_core::UserRecord;

use crate::http::error::ApiError;
use crate::state::AppState;

/// GET /user/{user_id} - full user record, re-evaluated if a year old
async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<UserRecord>, ApiError> {
    let store = state.gateway.store()?;
    let mut user = store
        .find(&user_id)
        .await?
        .ok_or_else(|| ApiError::user_not_found(&user_id))?;

    let previous_level = user.current_level;
    if user.reevaluate(Utc::now()) {
        if !store.update_level(&user).await? {
            return Err(ApiError::user_not_found(&user_id));
        }
        tracing::info!(
            user_id = %user.user_id,
            age = user.age,
            from = %previous_level,
            to = %user.current_level,
            "Re-evaluated user level"
        );
    }

    Ok(Json(user))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/user/{user_id}", get(get_user))
}
