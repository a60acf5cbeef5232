//! Shared helpers for API integration tests.
//!
//! Builds the application through [`build_app_router`] so every test
//! exercises the exact middleware stack production uses, and provides
//! request/seed helpers used across the test files.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use chrono::{Duration, NaiveDate, Utc};
use sqlx::PgPool;
use tower::ServiceExt;

use squadgame_api::auth::jwt::{generate_access_token, JwtConfig};
use squadgame_api::config::ServerConfig;
use squadgame_api::router::build_app_router;
use squadgame_api::state::AppState;
use squadgame_core::event::EventKind;
use squadgame_core::types::DbId;
use squadgame_db::models::event::{CreateDailyEvent, DailyEvent};
use squadgame_db::repositories::{DailyEventRepo, SquadRepo, UserRepo};
use squadgame_notify::push::PushClient;

/// Bearer secret accepted by the cron endpoints in tests.
pub const TEST_CRON_SECRET: &str = "test-cron-secret";

/// HMAC secret used to sign test JWTs.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-not-for-production";

/// Build a test `ServerConfig` with safe defaults.
///
/// The in-process cron driver is disabled; tests drive the lifecycle
/// explicitly through the HTTP endpoints.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8081".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        cron_secret: TEST_CRON_SECRET.to_string(),
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 60,
        },
        push_gateway_url: "http://127.0.0.1:9/push".to_string(),
        scheduler_enabled: false,
        scheduler_tick_secs: 60,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// The push gateway points at an unroutable address, so notification fan-out
/// in tests always resolves to failed dispatches instead of real traffic.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let push = Arc::new(PushClient::new(config.push_gateway_url.clone()));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        push,
    };

    build_app_router(state, &config)
}

/// Sign an access token for `user_id` with the test JWT secret.
pub fn token_for(user_id: DbId, role: &str) -> String {
    let config = test_config();
    generate_access_token(user_id, role, &config.jwt).expect("failed to sign test token")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request without authentication.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a bearer token.
pub async fn auth_get(app: Router, token: &str, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and a bearer token.
pub async fn auth_post_json(
    app: Router,
    token: &str,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a DELETE request with a bearer token.
pub async fn auth_delete(app: Router, token: &str, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST to a cron endpoint with the given bearer value (no JSON body).
pub async fn cron_post(app: Router, bearer: &str, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {bearer}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST to a cron endpoint with no Authorization header at all.
pub async fn cron_post_unauthenticated(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as a plain string.
pub async fn body_text(response: Response<Body>) -> String {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Assert the standard error envelope and return it.
pub async fn error_body(response: Response<Body>, expected: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), expected);
    let json = body_json(response).await;
    assert!(json["error"].is_string(), "error body missing message");
    assert!(json["code"].is_string(), "error body missing code");
    json
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// A seeded squad with three members, in submission order A, B, C.
pub struct SeededSquad {
    pub squad_id: DbId,
    pub alice: DbId,
    pub bob: DbId,
    pub carol: DbId,
}

/// Create a squad in UTC with three player members.
pub async fn seed_squad(pool: &PgPool) -> SeededSquad {
    let squad = SquadRepo::create(pool, "Test Squad", "UTC", "en")
        .await
        .expect("failed to create squad");
    let alice = UserRepo::create(pool, "Alice", "player")
        .await
        .expect("failed to create user");
    let bob = UserRepo::create(pool, "Bob", "player")
        .await
        .expect("failed to create user");
    let carol = UserRepo::create(pool, "Carol", "player")
        .await
        .expect("failed to create user");

    for user_id in [alice.id, bob.id, carol.id] {
        SquadRepo::add_member(pool, squad.id, user_id)
            .await
            .expect("failed to add member");
    }

    SeededSquad {
        squad_id: squad.id,
        alice: alice.id,
        bob: bob.id,
        carol: carol.id,
    }
}

/// Insert a scheduled event whose window already passed, so a single
/// open-then-close cycle settles it.
pub async fn seed_due_event(pool: &PgPool, squad_id: DbId, kind: EventKind) -> DailyEvent {
    seed_event_with_window(pool, squad_id, kind, -10, -5).await
}

/// Insert a scheduled event that is due to open but not yet due to close.
pub async fn seed_open_ready_event(pool: &PgPool, squad_id: DbId, kind: EventKind) -> DailyEvent {
    seed_event_with_window(pool, squad_id, kind, -1, 5).await
}

/// Insert a scheduled event with open/close offsets in minutes from now.
pub async fn seed_event_with_window(
    pool: &PgPool,
    squad_id: DbId,
    kind: EventKind,
    open_offset_mins: i64,
    close_offset_mins: i64,
) -> DailyEvent {
    let now = Utc::now();
    let event = CreateDailyEvent {
        squad_id,
        event_date: unique_event_date(open_offset_mins, close_offset_mins),
        kind,
        open_at: now + Duration::minutes(open_offset_mins),
        close_at: now + Duration::minutes(close_offset_mins),
        judge_user_id: None,
        poll_question: None,
        poll_options: None,
    };
    DailyEventRepo::insert_scheduled(pool, &event)
        .await
        .expect("failed to insert event")
        .expect("event for this squad and date already exists")
}

/// Pick a distinct event date per window so one squad can carry several
/// seeded events without tripping the one-per-day constraint.
fn unique_event_date(open_offset_mins: i64, close_offset_mins: i64) -> NaiveDate {
    let base = Utc::now().date_naive();
    let shift = (open_offset_mins.unsigned_abs() + close_offset_mins.unsigned_abs()) as u64 % 365;
    base - Duration::days(shift as i64)
}

/// Mark an event open directly, bypassing the open job.
pub async fn force_open(pool: &PgPool, event_id: DbId) {
    sqlx::query("UPDATE daily_events SET status = 'open' WHERE id = $1")
        .bind(event_id)
        .execute(pool)
        .await
        .expect("failed to force event open");
}
