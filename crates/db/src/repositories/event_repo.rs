//! Repository for the `daily_events` table.
//!
//! Scheduling inserts are idempotent through the `uq_daily_events_squad_date`
//! constraint, so a re-run of the daily generator never duplicates an event.
//! The close path claims each event inside its settlement transaction via
//! [`DailyEventRepo::claim_closed`] so two overlapping cron runs cannot settle
//! the same event twice.

use sqlx::{PgConnection, PgPool};
use squadgame_core::types::DbId;

use crate::models::event::{CreateDailyEvent, DailyEvent};

const COLUMNS: &str = "id, squad_id, event_date, kind, status, open_at, close_at, \
                       judge_user_id, poll_question, poll_options, created_at, updated_at";

pub struct DailyEventRepo;

impl DailyEventRepo {
    /// Insert a scheduled event for (squad, date).
    ///
    /// Returns `None` when the squad already has an event for that date; the
    /// caller counts that as a skip, not an error.
    pub async fn insert_scheduled(
        pool: &PgPool,
        event: &CreateDailyEvent,
    ) -> Result<Option<DailyEvent>, sqlx::Error> {
        let query = format!(
            "INSERT INTO daily_events \
                (squad_id, event_date, kind, status, open_at, close_at, \
                 judge_user_id, poll_question, poll_options) \
             VALUES ($1, $2, $3, 'scheduled', $4, $5, $6, $7, $8) \
             ON CONFLICT (squad_id, event_date) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DailyEvent>(&query)
            .bind(event.squad_id)
            .bind(event.event_date)
            .bind(event.kind.as_str())
            .bind(event.open_at)
            .bind(event.close_at)
            .bind(event.judge_user_id)
            .bind(&event.poll_question)
            .bind(&event.poll_options)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Option<DailyEvent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM daily_events WHERE id = $1");
        sqlx::query_as::<_, DailyEvent>(&query)
            .bind(event_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_squad_date(
        pool: &PgPool,
        squad_id: DbId,
        event_date: chrono::NaiveDate,
    ) -> Result<Option<DailyEvent>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM daily_events WHERE squad_id = $1 AND event_date = $2");
        sqlx::query_as::<_, DailyEvent>(&query)
            .bind(squad_id)
            .bind(event_date)
            .fetch_optional(pool)
            .await
    }

    /// Flip every due scheduled event to open in one statement.
    ///
    /// Opening carries no settlement work, so a single batch UPDATE is safe:
    /// a concurrent run simply matches zero rows. Returns the events this
    /// call transitioned, for notification fan-out.
    pub async fn open_due(pool: &PgPool) -> Result<Vec<DailyEvent>, sqlx::Error> {
        let query = format!(
            "UPDATE daily_events \
             SET status = 'open', updated_at = NOW() \
             WHERE status = 'scheduled' AND open_at <= NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DailyEvent>(&query).fetch_all(pool).await
    }

    /// Open events whose close time has passed. Each is settled in its own
    /// transaction by the close engine.
    pub async fn due_for_close(pool: &PgPool) -> Result<Vec<DailyEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM daily_events \
             WHERE status = 'open' AND close_at <= NOW() \
             ORDER BY close_at, id"
        );
        sqlx::query_as::<_, DailyEvent>(&query).fetch_all(pool).await
    }

    /// Claim an event for settlement by flipping it open -> closed.
    ///
    /// Runs inside the settlement transaction. Returns `false` when the event
    /// is no longer open, which means a concurrent run already claimed it and
    /// this one must abort without side effects.
    pub async fn claim_closed(
        conn: &mut PgConnection,
        event_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE daily_events \
             SET status = 'closed', updated_at = NOW() \
             WHERE id = $1 AND status = 'open'",
        )
        .bind(event_id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
