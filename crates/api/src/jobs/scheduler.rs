//! Daily event scheduler.
//!
//! For every squad, ensures exactly one [`DailyEvent`] exists for "today" in
//! the squad's local timezone: draws a kind and an open minute, resolves the
//! five-minute window to UTC, draws a judge, and inserts. The insert is keyed
//! on (squad, date), so a repeated run for the same day is a counted no-op.

use chrono::Utc;
use futures::future::join_all;
use rand::Rng;
use sqlx::PgPool;
use uuid::Uuid;

use squadgame_core::event::EventKind;
use squadgame_core::schedule;
use squadgame_core::types::DbId;
use squadgame_db::models::event::{CreateDailyEvent, DailyEvent};
use squadgame_db::models::squad::Squad;
use squadgame_db::repositories::{DailyEventRepo, PollRepo, SquadRepo};

use crate::error::AppError;

/// Aggregate outcome of one scheduling run.
#[derive(Debug, Default)]
pub struct ScheduleReport {
    /// Ids of the events this run created.
    pub created: Vec<DbId>,
    /// Squads that already had an event for their local today.
    pub skipped: usize,
    /// Squads whose scheduling failed (bad timezone, database error).
    pub failed: usize,
}

/// Schedule today's event for every squad.
///
/// Squads are processed concurrently and independently; one squad's failure
/// is logged and tallied without blocking its siblings. There is no retry
/// within the run -- the next cron invocation is the retry.
pub async fn generate_daily_events(pool: &PgPool) -> Result<ScheduleReport, sqlx::Error> {
    let run_id = Uuid::new_v4();
    let squads = SquadRepo::list(pool).await?;
    tracing::info!(%run_id, squads = squads.len(), "Daily event scheduling run started");

    let outcomes = join_all(
        squads
            .iter()
            .map(|squad| schedule_for_squad(pool, squad, run_id)),
    )
    .await;

    let mut report = ScheduleReport::default();
    for outcome in outcomes {
        match outcome {
            Ok(Some(event_id)) => report.created.push(event_id),
            Ok(None) => report.skipped += 1,
            Err(()) => report.failed += 1,
        }
    }

    tracing::info!(
        %run_id,
        created = report.created.len(),
        skipped = report.skipped,
        failed = report.failed,
        "Daily event scheduling run finished"
    );
    Ok(report)
}

/// Schedule one squad, converting any failure into a logged tally entry.
async fn schedule_for_squad(
    pool: &PgPool,
    squad: &Squad,
    run_id: Uuid,
) -> Result<Option<DbId>, ()> {
    match try_schedule(pool, squad).await {
        Ok(event) => Ok(event.map(|e| e.id)),
        Err(err) => {
            tracing::error!(
                %run_id,
                squad_id = squad.id,
                error = %err,
                "Failed to schedule daily event"
            );
            Err(())
        }
    }
}

/// The per-squad scheduling algorithm. Returns `None` when the squad already
/// has an event for its local today.
async fn try_schedule(pool: &PgPool, squad: &Squad) -> Result<Option<DailyEvent>, AppError> {
    let tz = schedule::parse_timezone(&squad.timezone)?;
    let today = schedule::local_today(tz, Utc::now());

    // Cheap existence probe; the insert below still carries the
    // (squad, date) conflict guard for runs racing each other.
    if DailyEventRepo::find_by_squad_date(pool, squad.id, today)
        .await?
        .is_some()
    {
        return Ok(None);
    }

    // ThreadRng is not Send, so the draws stay in scopes with no await.
    let (mut kind, open) = {
        let mut rng = rand::rng();
        (draw_kind(&mut rng), schedule::draw_open_time(&mut rng))
    };

    let (poll_question, poll_options) = if kind == EventKind::Poll {
        match PollRepo::draw_active(pool).await? {
            Some(question) => (Some(question.question), Some(question.options)),
            None => {
                // Nothing left to ask: fall back to a playable kind.
                kind = {
                    let mut rng = rand::rng();
                    draw_non_poll_kind(&mut rng)
                };
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    let judge_user_id = SquadRepo::pick_random_member(pool, squad.id).await?;
    let (open_at, close_at) = schedule::event_window(today, open, tz);

    let event = DailyEventRepo::insert_scheduled(
        pool,
        &CreateDailyEvent {
            squad_id: squad.id,
            event_date: today,
            kind,
            open_at,
            close_at,
            judge_user_id,
            poll_question,
            poll_options,
        },
    )
    .await?;

    if let Some(ref created) = event {
        tracing::info!(
            squad_id = squad.id,
            event_id = created.id,
            kind = %created.kind,
            open_at = %created.open_at,
            "Daily event scheduled"
        );
    }
    Ok(event)
}

fn draw_kind(rng: &mut impl Rng) -> EventKind {
    EventKind::ALL[rng.random_range(0..EventKind::ALL.len())]
}

fn draw_non_poll_kind(rng: &mut impl Rng) -> EventKind {
    EventKind::NON_POLL[rng.random_range(0..EventKind::NON_POLL.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_draw_covers_the_catalog() {
        let mut rng = rand::rng();
        for _ in 0..200 {
            let kind = draw_kind(&mut rng);
            assert!(EventKind::ALL.contains(&kind));
        }
    }

    #[test]
    fn fallback_draw_never_picks_poll() {
        let mut rng = rand::rng();
        for _ in 0..200 {
            assert_ne!(draw_non_poll_kind(&mut rng), EventKind::Poll);
        }
    }
}
