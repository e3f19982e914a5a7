//! End-to-end API integration tests
//!
//! These tests drive the HTTP router against the in-memory repository:
//! - Group creation through the wizard guards
//! - Bearer token authentication on organizer endpoints
//! - Fee quotes and category defaults
//! - Business number verification

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use matchup_api::api::{self, AppState};
use matchup_api::auth::jwt::create_token;
use matchup_api::config::AppConfig;
use matchup_api::domain::group::team_balance::MinPlayersPolicy;
use matchup_api::notifications::{NotificationKind, Notifier, RecordingSink};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for oneshot
use uuid::Uuid;

const TEST_SECRET: &str = "integration-test-secret";

/// Setup test application backed by memory
fn setup_app() -> (Router, Arc<RecordingSink>) {
    setup_app_with(AppConfig::default())
}

fn setup_app_with(config: AppConfig) -> (Router, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let config = AppConfig {
        jwt_secret: TEST_SECRET.to_string(),
        ..config
    };
    let state = AppState::in_memory(config, Notifier::new(sink.clone()));
    (api::router(state), sink)
}

fn bearer(organizer: Uuid) -> String {
    format!("Bearer {}", create_token(organizer, TEST_SECRET).unwrap())
}

fn post_json(uri: &str, payload: &Value, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    builder
        .body(Body::from(serde_json::to_string(payload).unwrap()))
        .unwrap()
}

fn get(uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn soccer_payload() -> Value {
    json!({
        "category": "soccer",
        "name": "Saturday morning eleven",
        "match_date": "2026-11-07",
        "reserved_on": "2026-11-01",
        "team": {
            "positions": ["GK", "DF", "MF", "FW"],
            "balance_by_experience": true,
            "creator_position_code": "FW",
            "creator_team": "blue"
        }
    })
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = setup_app();

    let response = app.oneshot(get("/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_create_soccer_group_with_early_fee() {
    let (app, sink) = setup_app();
    let organizer = Uuid::new_v4();
    let auth = bearer(organizer);

    let response = app
        .oneshot(post_json("/api/groups", &soccer_payload(), Some(&auth)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;

    assert_eq!(json["name"], "Saturday morning eleven");
    assert_eq!(json["category"], "soccer");
    assert_eq!(json["created_by"], organizer.to_string());
    assert_eq!(json["fee_config"]["has_fee"], true);
    assert_eq!(json["fee_config"]["fee_amount"], 8000);
    assert_eq!(json["team_settings"]["min_players_per_team"], 11);
    assert_eq!(json["team_settings"]["balance_by_experience"], true);
    assert_eq!(json["team_settings"]["creator_team"], "blue");
    assert_eq!(json["gender_restriction"], Value::Null);

    let last = sink.notifications().pop().unwrap();
    assert_eq!(last.kind, NotificationKind::Success);
}

#[tokio::test]
async fn test_same_day_soccer_reservation_pays_normal_fee() {
    let (app, _) = setup_app();
    let mut payload = soccer_payload();
    payload["reserved_on"] = json!("2026-11-07");

    let response = app
        .oneshot(post_json("/api/groups", &payload, Some(&bearer(Uuid::new_v4()))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["fee_config"]["fee_amount"], 10000);
}

#[tokio::test]
async fn test_create_group_requires_token() {
    let (app, _) = setup_app();

    let response = app
        .clone()
        .oneshot(post_json("/api/groups", &soccer_payload(), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(post_json("/api/groups", &soccer_payload(), Some("Bearer nope")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_short_name_reports_match_name_step() {
    let (app, sink) = setup_app();
    let mut payload = soccer_payload();
    payload["name"] = json!("a");

    let response = app
        .oneshot(post_json("/api/groups", &payload, Some(&bearer(Uuid::new_v4()))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["step"], "match_name");

    assert_eq!(sink.notifications()[0].kind, NotificationKind::Warning);
}

#[tokio::test]
async fn test_missing_fee_amount_reports_fee_step() {
    let (app, _) = setup_app();
    let payload = json!({
        "category": "tennis",
        "name": "Club doubles",
        "match_date": "2026-11-07",
        "reserved_on": "2026-11-01",
        "has_fee": true
    });

    let response = app
        .oneshot(post_json("/api/groups", &payload, Some(&bearer(Uuid::new_v4()))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["step"], "fee");
}

#[tokio::test]
async fn test_user_entered_fee_is_sanitized() {
    let (app, _) = setup_app();
    let payload = json!({
        "category": "badminton",
        "name": "Shuttle night",
        "match_date": "2026-11-07",
        "has_fee": true,
        "fee_amount": "12,000",
        "gender_restriction": "female"
    });

    let response = app
        .oneshot(post_json("/api/groups", &payload, Some(&bearer(Uuid::new_v4()))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["fee_config"]["fee_amount"], 12000);
    assert_eq!(json["gender_restriction"], "female");
}

#[tokio::test]
async fn test_malformed_fee_amount_is_bad_request() {
    let (app, _) = setup_app();
    let payload = json!({
        "category": "badminton",
        "name": "Shuttle night",
        "match_date": "2026-11-07",
        "has_fee": true,
        "fee_amount": "12k"
    });

    let response = app
        .oneshot(post_json("/api/groups", &payload, Some(&bearer(Uuid::new_v4()))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().starts_with("fee_amount"));
}

#[tokio::test]
async fn test_team_size_above_twenty_rejected_by_default() {
    let (app, _) = setup_app();
    let mut payload = soccer_payload();
    payload["team"]["min_players_per_team"] = json!(21);

    let response = app
        .oneshot(post_json("/api/groups", &payload, Some(&bearer(Uuid::new_v4()))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_team_size_above_twenty_clamped_when_configured() {
    let (app, _) = setup_app_with(AppConfig {
        min_players_policy: MinPlayersPolicy::Clamp,
        ..AppConfig::default()
    });
    let mut payload = soccer_payload();
    payload["team"]["min_players_per_team"] = json!(30);

    let response = app
        .oneshot(post_json("/api/groups", &payload, Some(&bearer(Uuid::new_v4()))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["team_settings"]["min_players_per_team"], 20);
}

#[tokio::test]
async fn test_unparseable_team_size_defaults_to_one() {
    let (app, _) = setup_app();
    let mut payload = soccer_payload();
    payload["team"]["min_players_per_team"] = json!("abc");

    let response = app
        .oneshot(post_json("/api/groups", &payload, Some(&bearer(Uuid::new_v4()))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["team_settings"]["min_players_per_team"], 1);
}

#[tokio::test]
async fn test_team_size_as_text_is_parsed() {
    let (app, _) = setup_app();
    let mut payload = soccer_payload();
    payload["team"]["min_players_per_team"] = json!(" 8 ");

    let response = app
        .oneshot(post_json("/api/groups", &payload, Some(&bearer(Uuid::new_v4()))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["team_settings"]["min_players_per_team"], 8);
}

#[tokio::test]
async fn test_unknown_category_is_bad_request() {
    let (app, _) = setup_app();
    let mut payload = soccer_payload();
    payload["category"] = json!("curling");

    let response = app
        .clone()
        .oneshot(post_json("/api/groups", &payload, Some(&bearer(Uuid::new_v4()))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Unknown category: curling"));

    let quote = json!({ "category": "curling", "match_date": "2026-11-07" });
    let response = app
        .oneshot(post_json("/api/fees/quote", &quote, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_malformed_body_is_bad_request_with_json_error() {
    let (app, _) = setup_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/fees/quote")
        .header("content-type", "application/json")
        .body(Body::from("{\"category\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_korean_category_names_are_accepted() {
    let (app, _) = setup_app();
    let mut payload = soccer_payload();
    payload["category"] = json!("축구");

    let response = app
        .clone()
        .oneshot(post_json("/api/groups", &payload, Some(&bearer(Uuid::new_v4()))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["category"], "soccer");
    assert_eq!(json["fee_config"]["fee_amount"], 8000);

    let quote = json!({
        "category": "축구",
        "match_date": "2026-11-07",
        "reserved_on": "2026-11-07"
    });
    let response = app
        .oneshot(post_json("/api/fees/quote", &quote, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["category"], "soccer");
    assert_eq!(json["amount"], 10000);
}

#[tokio::test]
async fn test_creator_position_without_team_rejected() {
    let (app, _) = setup_app();
    let mut payload = soccer_payload();
    payload["team"]["creator_team"] = Value::Null;

    let response = app
        .oneshot(post_json("/api/groups", &payload, Some(&bearer(Uuid::new_v4()))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["step"], "creator_position");
}

#[tokio::test]
async fn test_created_group_can_be_fetched_and_listed() {
    let (app, _) = setup_app();
    let organizer = Uuid::new_v4();
    let auth = bearer(organizer);

    let response = app
        .clone()
        .oneshot(post_json("/api/groups", &soccer_payload(), Some(&auth)))
        .await
        .unwrap();
    let created = body_json(response).await;
    let group_id = created["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(get(&format!("/api/groups/{}", group_id), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["id"], group_id);

    let response = app
        .clone()
        .oneshot(get("/api/groups", Some(&auth)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let response = app
        .oneshot(get("/api/groups", Some(&bearer(Uuid::new_v4()))))
        .await
        .unwrap();
    assert!(body_json(response).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_unknown_group_is_not_found() {
    let (app, _) = setup_app();

    let response = app
        .oneshot(get(&format!("/api/groups/{}", Uuid::new_v4()), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_fee_quote() {
    let (app, _) = setup_app();

    let early = json!({
        "category": "soccer",
        "match_date": "2026-11-07",
        "reserved_on": "2026-11-06"
    });
    let response = app
        .clone()
        .oneshot(post_json("/api/fees/quote", &early, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["amount"], 8000);
    assert_eq!(json["timing"], "early");
    assert_eq!(json["display_amount"], "8,000");

    let free = json!({
        "category": "running",
        "match_date": "2026-11-07",
        "has_fee": false,
        "fee_amount": "5000"
    });
    let response = app
        .oneshot(post_json("/api/fees/quote", &free, None))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["amount"], 0);
}

#[tokio::test]
async fn test_category_defaults() {
    let (app, _) = setup_app();

    let response = app
        .clone()
        .oneshot(get("/api/categories/soccer", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["suggested_min_players"], 11);
    assert_eq!(json["fixed_fee"]["normal"], 10000);
    assert_eq!(json["fixed_fee"]["early"], 8000);
    assert_eq!(json["steps"][4], "creator_position");

    let response = app
        .oneshot(get("/api/categories/curling", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_business_number_verification() {
    let (app, _) = setup_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/facilities/business-number/verify",
            &json!({"business_number": "1248100998"}),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["valid"], true);
    assert_eq!(json["business_number"], "124-81-00998");

    let response = app
        .oneshot(post_json(
            "/api/facilities/business-number/verify",
            &json!({"business_number": "123-45-67890"}),
            None,
        ))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["valid"], false);
    assert!(json["reason"].is_string());
}
