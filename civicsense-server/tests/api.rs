//! End-to-end tests of the `/api` routes against the in-memory store.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{Datelike, Duration, NaiveDate, Utc};
use civicsense_core::{calculate_age, map_age_to_level, UserRecord};
use civicsense_server::{build_router, AppState, Gateway, MemoryUserStore, UserStore};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app_with(store: Arc<MemoryUserStore>) -> Router {
    build_router(AppState::new(Gateway::new(store)), true)
}

fn app() -> Router {
    app_with(Arc::new(MemoryUserStore::new()))
}

fn offline_app() -> Router {
    build_router(AppState::new(Gateway::unavailable()), true)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn register(app: &Router, dob: &str) -> String {
    let (status, body) = send(app, post_json("/api/register", json!({ "dob": dob }))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["user_id"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn register_returns_age_and_level() {
    let app = app();
    let (status, body) = send(&app, post_json("/api/register", json!({"dob": "2020-01-01"}))).await;

    assert_eq!(status, StatusCode::CREATED);
    let expected_age = calculate_age(
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        Utc::now().date_naive(),
    );
    assert_eq!(body["age"], expected_age);
    assert_eq!(body["current_level"], map_age_to_level(expected_age).get());
    assert!(uuid::Uuid::parse_str(body["user_id"].as_str().unwrap()).is_ok());
    assert_eq!(body.as_object().unwrap().len(), 3);
}

#[tokio::test]
async fn register_rejects_missing_or_malformed_dob() {
    let app = app();

    let (status, body) = send(&app, post_json("/api/register", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "DOB is required");

    let (status, body) = send(&app, post_json("/api/register", json!({"dob": "01-01-2020"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid DOB format. Use YYYY-MM-DD");

    let (status, body) = send(&app, post_json("/api/register", json!({"dob": " 2019-01-01 "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid DOB format. Use YYYY-MM-DD");

    let tomorrow = (Utc::now() + Duration::days(2)).date_naive().format("%Y-%m-%d").to_string();
    let (status, _) = send(&app, post_json("/api/register", json!({ "dob": tomorrow }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_rejects_non_json_body() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("dob=2020-01-01"))
        .unwrap();

    let (status, body) = send(&app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Malformed request body"));
}

#[tokio::test]
async fn register_then_fetch_is_consistent() {
    let store = Arc::new(MemoryUserStore::new());
    let app = app_with(store.clone());

    let (_, registered) = send(&app, post_json("/api/register", json!({"dob": "2017-08-09"}))).await;
    let user_id = registered["user_id"].as_str().unwrap();

    let (status, user) = send(&app, get(&format!("/api/user/{user_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["user_id"], registered["user_id"]);
    assert_eq!(user["age"], registered["age"]);
    assert_eq!(user["current_level"], registered["current_level"]);
    assert_eq!(user["dob"], "2017-08-09");
    assert_eq!(
        user["civic_scores"],
        json!({"hygiene": 0, "empathy": 0, "discipline": 0, "environment": 0})
    );
    assert!(user.get("_id").is_none());
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn unknown_user_is_404() {
    let (status, body) = send(&app(), get("/api/user/does-not-exist")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn stale_user_is_reevaluated_on_read() {
    let store = Arc::new(MemoryUserStore::new());
    let app = app_with(store.clone());

    // Registered two years ago when the child was 5
    let registered_at = Utc::now() - Duration::days(2 * 365 + 1);
    let today = Utc::now().date_naive();
    let dob = NaiveDate::from_ymd_opt(today.year() - 7, 1, 1).unwrap();
    let stale = UserRecord::with_id("stale-user", dob, registered_at);
    assert_eq!(stale.current_level.get(), 2);
    store.insert(&stale).await.unwrap();

    let (status, body) = send(&app, get("/api/user/stale-user")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["age"], 7);
    assert_eq!(body["current_level"], 3);

    let persisted = store.find("stale-user").await.unwrap().unwrap();
    assert_eq!(persisted.age, 7);
    assert_eq!(persisted.current_level.get(), 3);
    assert!(persisted.last_level_update_date > registered_at);
}

#[tokio::test]
async fn recent_user_is_not_reevaluated() {
    let store = Arc::new(MemoryUserStore::new());
    let app = app_with(store.clone());

    let registered_at = Utc::now() - Duration::days(100);
    let mut user = UserRecord::with_id("recent-user", NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(), registered_at);
    // Deliberately out of date to prove it is left alone
    user.age = 1;
    user.current_level = map_age_to_level(1);
    store.insert(&user).await.unwrap();

    let (_, body) = send(&app, get("/api/user/recent-user")).await;
    assert_eq!(body["age"], 1);
    assert_eq!(body["current_level"], 1);
    assert_eq!(store.find("recent-user").await.unwrap().unwrap().last_level_update_date, registered_at);
}

#[tokio::test]
async fn missions_filter_by_level() {
    let app = app();

    let (status, body) = send(&app, get("/api/missions?level=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["mission_id"], "mission_hyg_001");
    assert_eq!(body[0]["level_required"], 2);

    let (status, body) = send(&app, get("/api/missions?level=1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["mission_id"], "mission_hyg_000");
    assert!(body[0].get("game_data").is_none());

    let (status, body) = send(&app, get("/api/missions?level=3")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn missions_require_integer_level() {
    let app = app();

    let (status, body) = send(&app, get("/api/missions")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Level parameter required");

    let (status, _) = send(&app, get("/api/missions?level=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn score_updates_accumulate() {
    let app = app();
    let user_id = register(&app, "2019-05-05").await;

    let update = json!({
        "user_id": user_id,
        "mission_id": "mission_hyg_001",
        "scores_earned": {"hygiene": 10, "environment": 5, "karma": 3}
    });

    let (status, body) = send(&app, post_json("/api/score/update", update.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Scores updated successfully");
    assert_eq!(body["civic_scores"]["hygiene"], 10);

    let (_, body) = send(&app, post_json("/api/score/update", update)).await;
    assert_eq!(
        body["civic_scores"],
        json!({"hygiene": 20, "empathy": 0, "discipline": 0, "environment": 10})
    );

    let (_, user) = send(&app, get(&format!("/api/user/{user_id}"))).await;
    assert_eq!(user["civic_scores"]["hygiene"], 20);
}

#[tokio::test]
async fn negative_deltas_are_applied() {
    let app = app();
    let user_id = register(&app, "2019-05-05").await;

    let update = json!({"user_id": user_id, "scores_earned": {"discipline": -4}});
    let (status, body) = send(&app, post_json("/api/score/update", update)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["civic_scores"]["discipline"], -4);
}

#[tokio::test]
async fn score_update_validation() {
    let app = app();
    let user_id = register(&app, "2019-05-05").await;

    let (status, body) = send(
        &app,
        post_json("/api/score/update", json!({"user_id": user_id, "scores_earned": {"unknown_cat": 5}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid score categories");

    let (status, _) = send(
        &app,
        post_json("/api/score/update", json!({"user_id": user_id, "scores_earned": {}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        post_json("/api/score/update", json!({"scores_earned": {"hygiene": 1}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "user_id and scores_earned are required");
}

#[tokio::test]
async fn score_update_ignores_unknown_keys_of_any_type() {
    let app = app();
    let user_id = register(&app, "2019-05-05").await;

    let update = json!({
        "user_id": user_id,
        "scores_earned": {"hygiene": 10, "badge": "gold", "ratio": 1.5, "note": null}
    });
    let (status, body) = send(&app, post_json("/api/score/update", update)).await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(
        body["civic_scores"],
        json!({"hygiene": 10, "empathy": 0, "discipline": 0, "environment": 0})
    );
}

#[tokio::test]
async fn score_update_rejects_non_integer_for_known_category() {
    let app = app();
    let user_id = register(&app, "2019-05-05").await;

    let update = json!({"user_id": user_id, "scores_earned": {"hygiene": "ten"}});
    let (status, body) = send(&app, post_json("/api/score/update", update)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "score for hygiene must be an integer");

    let (_, user) = send(&app, get(&format!("/api/user/{user_id}"))).await;
    assert_eq!(user["civic_scores"]["hygiene"], 0);
}

#[tokio::test]
async fn score_update_for_unknown_user_is_404() {
    let update = json!({"user_id": "ghost", "scores_earned": {"empathy": 2}});
    let (status, body) = send(&app(), post_json("/api/score/update", update)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn unavailable_store_fails_with_500() {
    let app = offline_app();

    let (status, body) = send(&app, post_json("/api/register", json!({"dob": "2020-01-01"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Database not connected");

    let (status, _) = send(&app, get("/api/user/anyone")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let update = json!({"user_id": "anyone", "scores_earned": {"hygiene": 1}});
    let (status, _) = send(&app, post_json("/api/score/update", update)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn validation_precedes_store_availability() {
    let app = offline_app();

    let (status, _) = send(&app, post_json("/api/register", json!({"dob": "garbage"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, get("/api/missions?level=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn health_reports_unavailable_store() {
    let (status, body) = send(&offline_app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["store"], "unavailable");
}
