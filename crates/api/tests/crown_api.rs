//! Integration tests for the crown ledger: awards, headlines, rivalries,
//! and the squad-scoped reads.

mod common;

use axum::http::StatusCode;
use common::{
    auth_get, auth_post_json, body_json, cron_post, error_body, seed_due_event, seed_squad,
    token_for, SeededSquad, TEST_CRON_SECRET,
};
use sqlx::PgPool;
use squadgame_core::event::EventKind;
use squadgame_core::types::DbId;
use squadgame_db::repositories::{CrownRepo, HeadlineRepo, UserRepo};

/// Run a full event cycle where Alice wins, then return (event id, crown id).
async fn settle_with_alice_winning(pool: &PgPool, squad: &SeededSquad) -> (DbId, DbId) {
    let event = seed_due_event(pool, squad.squad_id, EventKind::QuickMath).await;

    let app = common::build_test_app(pool.clone());
    cron_post(app, TEST_CRON_SECRET, "/open-events").await;

    for (user_id, score) in [(squad.alice, 30), (squad.bob, 20), (squad.carol, 10)] {
        let app = common::build_test_app(pool.clone());
        let response = auth_post_json(
            app,
            &token_for(user_id, "player"),
            &format!("/api/v1/events/{}/submissions", event.id),
            serde_json::json!({ "score": score }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let app = common::build_test_app(pool.clone());
    cron_post(app, TEST_CRON_SECRET, "/close-events").await;

    let crown = CrownRepo::active_for_squad(pool, squad.squad_id, chrono::Utc::now())
        .await
        .expect("crown query failed")
        .expect("settlement granted no crown");
    assert_eq!(crown.user_id, squad.alice);
    (event.id, crown.id)
}

/// Push the crown's expiry into the past.
async fn expire_crown(pool: &PgPool, crown_id: DbId) {
    sqlx::query("UPDATE crown_holders SET expires_at = NOW() - INTERVAL '1 hour' WHERE id = $1")
        .bind(crown_id)
        .execute(pool)
        .await
        .expect("failed to expire crown");
}

// ---------------------------------------------------------------------------
// Test: manual award replays are deduplicated per event
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn manual_award_after_settlement_is_deduplicated(pool: PgPool) {
    let squad = seed_squad(&pool).await;
    let (event_id, crown_id) = settle_with_alice_winning(&pool, &squad).await;

    let app = common::build_test_app(pool.clone());
    let response = cron_post_award(app, event_id).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["newly_granted"], false);
    assert_eq!(json["data"]["crown"]["id"], serde_json::json!(crown_id));
    assert_eq!(
        json["data"]["crown"]["user_id"],
        serde_json::json!(squad.alice)
    );
}

async fn cron_post_award(app: axum::Router, event_id: DbId) -> axum::response::Response {
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/crowns/award")
        .header(header::AUTHORIZATION, format!("Bearer {TEST_CRON_SECRET}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::json!({ "event_id": event_id }).to_string(),
        ))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Test: awarding an unknown event is a 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn award_for_unknown_event_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = cron_post_award(app, 999_999).await;

    let json = error_body(response, StatusCode::NOT_FOUND).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: the holder can publish a headline; it is trimmed and replaceable
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn holder_publishes_and_replaces_headline(pool: PgPool) {
    let squad = seed_squad(&pool).await;
    let (_, crown_id) = settle_with_alice_winning(&pool, &squad).await;
    let alice = token_for(squad.alice, "player");

    let app = common::build_test_app(pool.clone());
    let response = auth_post_json(
        app,
        &alice,
        "/api/v1/headlines",
        serde_json::json!({ "crown_id": crown_id, "content": "  All hail the queen  " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["content"], "All hail the queen");

    // A second publish replaces the first; one headline per crown.
    let app = common::build_test_app(pool.clone());
    let response = auth_post_json(
        app,
        &alice,
        "/api/v1/headlines",
        serde_json::json!({ "crown_id": crown_id, "content": "New decree" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let stored = HeadlineRepo::find_by_crown(&pool, crown_id)
        .await
        .expect("headline query failed")
        .expect("headline missing");
    assert_eq!(stored.content, "New decree");

    // Squad members see it through the read endpoint.
    let bob = token_for(squad.bob, "player");
    let app = common::build_test_app(pool.clone());
    let response = auth_get(
        app,
        &bob,
        &format!("/api/v1/squads/{}/headline", squad.squad_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["content"], "New decree");
}

// ---------------------------------------------------------------------------
// Test: headline content rules (empty / exactly 50 / over 50)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn headline_content_rules(pool: PgPool) {
    let squad = seed_squad(&pool).await;
    let (_, crown_id) = settle_with_alice_winning(&pool, &squad).await;
    let alice = token_for(squad.alice, "player");

    // Whitespace-only content is empty after trimming.
    let app = common::build_test_app(pool.clone());
    let response = auth_post_json(
        app,
        &alice,
        "/api/v1/headlines",
        serde_json::json!({ "crown_id": crown_id, "content": "   " }),
    )
    .await;
    let json = error_body(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "HEADLINE_EMPTY");

    // Exactly 50 characters passes.
    let exactly_50 = "x".repeat(50);
    let app = common::build_test_app(pool.clone());
    let response = auth_post_json(
        app,
        &alice,
        "/api/v1/headlines",
        serde_json::json!({ "crown_id": crown_id, "content": exactly_50 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // 51 characters is over the limit; the count is measured after trimming.
    let over = format!(" {} ", "x".repeat(51));
    let app = common::build_test_app(pool.clone());
    let response = auth_post_json(
        app,
        &alice,
        "/api/v1/headlines",
        serde_json::json!({ "crown_id": crown_id, "content": over }),
    )
    .await;
    let json = error_body(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "HEADLINE_TOO_LONG");
    assert_eq!(json["error"], "Headline exceeds 50 characters (got 51)");
}

// ---------------------------------------------------------------------------
// Test: only the holder writes; expiry closes the window
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn non_holder_cannot_publish_headline(pool: PgPool) {
    let squad = seed_squad(&pool).await;
    let (_, crown_id) = settle_with_alice_winning(&pool, &squad).await;
    let bob = token_for(squad.bob, "player");

    let app = common::build_test_app(pool.clone());
    let response = auth_post_json(
        app,
        &bob,
        "/api/v1/headlines",
        serde_json::json!({ "crown_id": crown_id, "content": "Usurper's decree" }),
    )
    .await;

    let json = error_body(response, StatusCode::FORBIDDEN).await;
    assert_eq!(json["code"], "NOT_CROWN_OWNER");
}

#[sqlx::test(migrations = "../../migrations")]
async fn expired_crown_cannot_publish(pool: PgPool) {
    let squad = seed_squad(&pool).await;
    let (_, crown_id) = settle_with_alice_winning(&pool, &squad).await;
    expire_crown(&pool, crown_id).await;
    let alice = token_for(squad.alice, "player");

    let app = common::build_test_app(pool.clone());
    let response = auth_post_json(
        app,
        &alice,
        "/api/v1/headlines",
        serde_json::json!({ "crown_id": crown_id, "content": "Too late" }),
    )
    .await;

    let json = error_body(response, StatusCode::GONE).await;
    assert_eq!(json["code"], "CROWN_EXPIRED");
}

#[sqlx::test(migrations = "../../migrations")]
async fn unknown_crown_returns_its_own_code(pool: PgPool) {
    let squad = seed_squad(&pool).await;
    let alice = token_for(squad.alice, "player");

    let app = common::build_test_app(pool.clone());
    let response = auth_post_json(
        app,
        &alice,
        "/api/v1/headlines",
        serde_json::json!({ "crown_id": 999_999, "content": "Ghost crown" }),
    )
    .await;

    let json = error_body(response, StatusCode::NOT_FOUND).await;
    assert_eq!(json["code"], "CROWN_NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: rivalry declaration rules
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn holder_declares_rivalry_and_check_is_symmetric(pool: PgPool) {
    let squad = seed_squad(&pool).await;
    let (_, crown_id) = settle_with_alice_winning(&pool, &squad).await;
    let alice = token_for(squad.alice, "player");

    let app = common::build_test_app(pool.clone());
    let response = auth_post_json(
        app,
        &alice,
        "/api/v1/rivalries",
        serde_json::json!({
            "crown_id": crown_id,
            "rival1_user_id": squad.bob,
            "rival2_user_id": squad.carol,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["declared_by"], serde_json::json!(squad.alice));

    // The check matches in both orders.
    for (a, b) in [(squad.bob, squad.carol), (squad.carol, squad.bob)] {
        let app = common::build_test_app(pool.clone());
        let response = auth_get(
            app,
            &alice,
            &format!(
                "/api/v1/squads/{}/rivals?user_a={a}&user_b={b}",
                squad.squad_id
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["are_rivals"], true);
    }

    // An undeclared pair is not a rivalry.
    let app = common::build_test_app(pool.clone());
    let response = auth_get(
        app,
        &alice,
        &format!(
            "/api/v1/squads/{}/rivals?user_a={}&user_b={}",
            squad.squad_id, squad.alice, squad.bob
        ),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["are_rivals"], false);
}

#[sqlx::test(migrations = "../../migrations")]
async fn rivalry_rejects_invalid_pairs(pool: PgPool) {
    let squad = seed_squad(&pool).await;
    let (_, crown_id) = settle_with_alice_winning(&pool, &squad).await;
    let alice = token_for(squad.alice, "player");

    let outsider = UserRepo::create(&pool, "Mallory", "player")
        .await
        .expect("failed to create user");

    // Same user twice.
    let app = common::build_test_app(pool.clone());
    let response = auth_post_json(
        app,
        &alice,
        "/api/v1/rivalries",
        serde_json::json!({
            "crown_id": crown_id,
            "rival1_user_id": squad.bob,
            "rival2_user_id": squad.bob,
        }),
    )
    .await;
    let json = error_body(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "RIVALS_IDENTICAL");

    // The declarer cannot star in their own rivalry.
    let app = common::build_test_app(pool.clone());
    let response = auth_post_json(
        app,
        &alice,
        "/api/v1/rivalries",
        serde_json::json!({
            "crown_id": crown_id,
            "rival1_user_id": squad.alice,
            "rival2_user_id": squad.bob,
        }),
    )
    .await;
    let json = error_body(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "DECLARER_AMONG_RIVALS");

    // Rivals must both belong to the squad.
    let app = common::build_test_app(pool.clone());
    let response = auth_post_json(
        app,
        &alice,
        "/api/v1/rivalries",
        serde_json::json!({
            "crown_id": crown_id,
            "rival1_user_id": squad.bob,
            "rival2_user_id": outsider.id,
        }),
    )
    .await;
    let json = error_body(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "RIVAL_NOT_MEMBER");
}

// ---------------------------------------------------------------------------
// Test: squad-scoped crown reads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn my_crown_reflects_the_holder(pool: PgPool) {
    let squad = seed_squad(&pool).await;
    settle_with_alice_winning(&pool, &squad).await;

    let alice = token_for(squad.alice, "player");
    let app = common::build_test_app(pool.clone());
    let response = auth_get(
        app,
        &alice,
        &format!("/api/v1/squads/{}/crown/me", squad.squad_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_holder"], true);
    assert!(json["data"]["expires_at"].is_string());

    let bob = token_for(squad.bob, "player");
    let app = common::build_test_app(pool.clone());
    let response = auth_get(
        app,
        &bob,
        &format!("/api/v1/squads/{}/crown/me", squad.squad_id),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_holder"], false);
    assert!(json["data"].get("expires_at").is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn active_crown_read_is_null_when_expired(pool: PgPool) {
    let squad = seed_squad(&pool).await;
    let (_, crown_id) = settle_with_alice_winning(&pool, &squad).await;

    let alice = token_for(squad.alice, "player");
    let app = common::build_test_app(pool.clone());
    let response = auth_get(
        app,
        &alice,
        &format!("/api/v1/squads/{}/crown", squad.squad_id),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["user_id"], serde_json::json!(squad.alice));

    expire_crown(&pool, crown_id).await;

    let app = common::build_test_app(pool.clone());
    let response = auth_get(
        app,
        &alice,
        &format!("/api/v1/squads/{}/crown", squad.squad_id),
    )
    .await;
    let json = body_json(response).await;
    assert!(json["data"].is_null());
}

#[sqlx::test(migrations = "../../migrations")]
async fn crown_reads_are_membership_gated(pool: PgPool) {
    let squad = seed_squad(&pool).await;
    settle_with_alice_winning(&pool, &squad).await;

    let outsider = UserRepo::create(&pool, "Mallory", "player")
        .await
        .expect("failed to create user");
    let token = token_for(outsider.id, "player");

    let app = common::build_test_app(pool.clone());
    let response = auth_get(
        app,
        &token,
        &format!("/api/v1/squads/{}/crown", squad.squad_id),
    )
    .await;
    let json = error_body(response, StatusCode::FORBIDDEN).await;
    assert_eq!(json["code"], "FORBIDDEN");
}
