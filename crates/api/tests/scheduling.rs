//! Integration tests for the daily scheduling engine: window placement,
//! judge draw, per-day idempotence, the poll-pool fallback, and per-squad
//! failure isolation.

mod common;

use chrono::{Duration, Timelike, Utc};
use sqlx::PgPool;
use squadgame_api::jobs::scheduler::generate_daily_events;
use squadgame_core::schedule::{
    parse_timezone, EVENT_DURATION_MINS, OPEN_HOUR_EARLIEST, OPEN_HOUR_LATEST,
};
use squadgame_db::repositories::{DailyEventRepo, SquadRepo, UserRepo};

async fn seed_member(pool: &PgPool, squad_id: i64, name: &str) -> i64 {
    let user = UserRepo::create(pool, name, "player").await.unwrap();
    SquadRepo::add_member(pool, squad_id, user.id).await.unwrap();
    user.id
}

// ---------------------------------------------------------------------------
// Test: one well-formed event per squad
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn generate_creates_one_event_per_squad(pool: PgPool) {
    let first = common::seed_squad(&pool).await;
    let second = common::seed_squad(&pool).await;

    let report = generate_daily_events(&pool).await.unwrap();
    assert_eq!(report.created.len(), 2);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.failed, 0);

    let members = [
        (first.squad_id, vec![first.alice, first.bob, first.carol]),
        (second.squad_id, vec![second.alice, second.bob, second.carol]),
    ];

    for event_id in &report.created {
        let event = DailyEventRepo::find_by_id(&pool, *event_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event.status, "scheduled");
        assert_eq!(event.event_date, Utc::now().date_naive());

        // Seeded squads are UTC, so the local window reads off directly.
        let open_hour = event.open_at.hour();
        assert!(
            (OPEN_HOUR_EARLIEST..=OPEN_HOUR_LATEST).contains(&open_hour),
            "open hour {open_hour} outside the daily window"
        );
        assert_eq!(
            event.close_at - event.open_at,
            Duration::minutes(EVENT_DURATION_MINS)
        );

        let squad_members = &members
            .iter()
            .find(|(id, _)| *id == event.squad_id)
            .expect("event belongs to a seeded squad")
            .1;
        let judge = event.judge_user_id.expect("judge should be drawn");
        assert!(squad_members.contains(&judge), "judge must be a member");

        // A poll draw must carry its question; other kinds must not.
        if event.kind == "poll" {
            assert!(event.poll_question.is_some());
            assert!(event.poll_options.is_some());
        } else {
            assert!(event.poll_question.is_none());
        }
    }
}

// ---------------------------------------------------------------------------
// Test: a second run the same day is a no-op
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn generate_skips_squads_with_an_event_today(pool: PgPool) {
    common::seed_squad(&pool).await;
    common::seed_squad(&pool).await;

    let first = generate_daily_events(&pool).await.unwrap();
    assert_eq!(first.created.len(), 2);

    let second = generate_daily_events(&pool).await.unwrap();
    assert!(second.created.is_empty(), "Re-run must not schedule again");
    assert_eq!(second.skipped, 2);
    assert_eq!(second.failed, 0);
}

// ---------------------------------------------------------------------------
// Test: empty poll pool falls back to a non-poll kind
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn empty_poll_pool_never_yields_poll_events(pool: PgPool) {
    sqlx::query("UPDATE poll_questions SET is_active = FALSE")
        .execute(&pool)
        .await
        .unwrap();

    // Several squads, so the fallback path is very likely drawn at least once.
    for _ in 0..6 {
        common::seed_squad(&pool).await;
    }

    let report = generate_daily_events(&pool).await.unwrap();
    assert_eq!(report.created.len(), 6);
    assert_eq!(report.failed, 0);

    for event_id in &report.created {
        let event = DailyEventRepo::find_by_id(&pool, *event_id)
            .await
            .unwrap()
            .unwrap();
        assert_ne!(event.kind, "poll", "Empty pool must redraw the kind");
        assert!(event.poll_question.is_none());
    }
}

// ---------------------------------------------------------------------------
// Test: a bad timezone fails one squad, not the run
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn bad_timezone_fails_one_squad_not_the_run(pool: PgPool) {
    let healthy = common::seed_squad(&pool).await;

    let broken = SquadRepo::create(&pool, "Lost in Time", "Not/AZone", "en")
        .await
        .unwrap();
    seed_member(&pool, broken.id, "stranded").await;

    let report = generate_daily_events(&pool).await.unwrap();
    assert_eq!(report.created.len(), 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.skipped, 0);

    let event = DailyEventRepo::find_by_id(&pool, report.created[0])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event.squad_id, healthy.squad_id);
    assert!(
        DailyEventRepo::find_by_squad_date(&pool, broken.id, Utc::now().date_naive())
            .await
            .unwrap()
            .is_none(),
        "Broken squad must not get an event"
    );
}

// ---------------------------------------------------------------------------
// Test: the window lands in the squad's local day
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn window_is_drawn_in_the_squads_local_day(pool: PgPool) {
    let squad = SquadRepo::create(&pool, "Jerusalem Crew", "Asia/Jerusalem", "he")
        .await
        .unwrap();
    seed_member(&pool, squad.id, "yael").await;

    let report = generate_daily_events(&pool).await.unwrap();
    assert_eq!(report.created.len(), 1);

    let event = DailyEventRepo::find_by_id(&pool, report.created[0])
        .await
        .unwrap()
        .unwrap();

    let tz = parse_timezone("Asia/Jerusalem").unwrap();
    let local_open = event.open_at.with_timezone(&tz);
    assert_eq!(event.event_date, Utc::now().with_timezone(&tz).date_naive());
    assert!(
        (OPEN_HOUR_EARLIEST..=OPEN_HOUR_LATEST).contains(&local_open.hour()),
        "local open hour {} outside the daily window",
        local_open.hour()
    );
    assert_eq!(
        event.close_at - event.open_at,
        Duration::minutes(EVENT_DURATION_MINS)
    );
}
