//! Event status transitions: the open half and the close half.
//!
//! Both halves run every minute. Opening is a single status-guarded batch
//! UPDATE followed by a push fan-out. Closing settles each event inside its
//! own transaction: claim the status flip, rank, award points, apply
//! missed-event penalties; crown award and the results fan-out happen after
//! commit and are best-effort.

use futures::future::join_all;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use squadgame_core::event::EventKind;
use squadgame_core::types::DbId;
use squadgame_db::models::event::DailyEvent;
use squadgame_db::repositories::{
    DailyEventRepo, DeviceTokenRepo, PenaltyRepo, SquadRepo, SubmissionRepo, UserRepo,
};
use squadgame_notify::{compose, DispatchReport, Locale, PushClient, PushMessage};

use crate::handlers::crown;

/// Aggregate outcome of one open run.
#[derive(Debug, Default)]
pub struct OpenReport {
    /// Ids of the events flipped to open.
    pub opened: Vec<DbId>,
    /// Per-recipient outcomes of the opening fan-out.
    pub notify: DispatchReport,
}

/// Aggregate outcome of one close run.
#[derive(Debug, Default)]
pub struct CloseReport {
    /// Ids of the events this run settled.
    pub closed: Vec<DbId>,
    /// Events whose settlement failed (left open for the next run).
    pub failed: usize,
    /// Per-recipient outcomes of the results fan-out.
    pub notify: DispatchReport,
}

// ---------------------------------------------------------------------------
// Open half
// ---------------------------------------------------------------------------

/// Flip every due scheduled event to open, then announce each one to its
/// squad. Notification failures never roll back the flip.
pub async fn open_due_events(
    pool: &PgPool,
    push: &PushClient,
) -> Result<OpenReport, sqlx::Error> {
    let run_id = Uuid::new_v4();
    let opened = DailyEventRepo::open_due(pool).await?;
    if opened.is_empty() {
        return Ok(OpenReport::default());
    }
    tracing::info!(%run_id, count = opened.len(), "Opened due events");

    let dispatches = join_all(
        opened
            .iter()
            .map(|event| announce_opened(pool, push, event, run_id)),
    )
    .await;

    let mut report = OpenReport {
        opened: opened.iter().map(|e| e.id).collect(),
        ..OpenReport::default()
    };
    for dispatch in dispatches {
        report.notify.merge(dispatch);
    }

    tracing::info!(
        %run_id,
        opened = report.opened.len(),
        notified = report.notify.sent(),
        notify_failed = report.notify.failed(),
        "Open run finished"
    );
    Ok(report)
}

/// Push the "event is live" announcement for one opened event.
async fn announce_opened(
    pool: &PgPool,
    push: &PushClient,
    event: &DailyEvent,
    run_id: Uuid,
) -> DispatchReport {
    match opened_messages(pool, event).await {
        Ok(messages) => push.dispatch(messages).await,
        Err(err) => {
            tracing::warn!(
                %run_id,
                event_id = event.id,
                error = %err,
                "Failed to build opening notifications"
            );
            DispatchReport::default()
        }
    }
}

async fn opened_messages(
    pool: &PgPool,
    event: &DailyEvent,
) -> Result<Vec<PushMessage>, sqlx::Error> {
    let Some(kind) = EventKind::parse(&event.kind) else {
        tracing::warn!(event_id = event.id, kind = %event.kind, "Unknown event kind");
        return Ok(Vec::new());
    };
    let Some(squad) = SquadRepo::find_by_id(pool, event.squad_id).await? else {
        return Ok(Vec::new());
    };
    let tokens = DeviceTokenRepo::tokens_for_squad(pool, event.squad_id).await?;
    if tokens.is_empty() {
        return Ok(Vec::new());
    }

    let copy = compose::event_opened(Locale::parse(&squad.locale), &squad.name, kind);
    Ok(to_messages(tokens, &copy.title, &copy.body, event, "event_opened"))
}

// ---------------------------------------------------------------------------
// Close half
// ---------------------------------------------------------------------------

/// Settle every due open event, then announce results.
///
/// Settlements run one at a time: sibling settlements update the same
/// `users` rows and concurrent transactions can deadlock. The post-commit
/// fan-out has no such ordering and runs concurrently per event.
pub async fn close_due_events(
    pool: &PgPool,
    push: &PushClient,
) -> Result<CloseReport, sqlx::Error> {
    let run_id = Uuid::new_v4();
    let due = DailyEventRepo::due_for_close(pool).await?;
    if due.is_empty() {
        return Ok(CloseReport::default());
    }
    tracing::info!(%run_id, count = due.len(), "Closing due events");

    let mut report = CloseReport::default();
    let mut settled: Vec<&DailyEvent> = Vec::new();
    for event in &due {
        match settle_event(pool, event, run_id).await {
            Ok(true) => {
                report.closed.push(event.id);
                settled.push(event);
            }
            // Another invocation claimed the close first.
            Ok(false) => {}
            Err(err) => {
                tracing::error!(
                    %run_id,
                    event_id = event.id,
                    error = %err,
                    "Failed to settle event"
                );
                report.failed += 1;
            }
        }
    }

    let dispatches = join_all(
        settled
            .iter()
            .map(|event| finalize_event(pool, push, event, run_id)),
    )
    .await;
    for dispatch in dispatches {
        report.notify.merge(dispatch);
    }

    tracing::info!(
        %run_id,
        closed = report.closed.len(),
        failed = report.failed,
        notified = report.notify.sent(),
        notify_failed = report.notify.failed(),
        "Close run finished"
    );
    Ok(report)
}

/// Settle one event inside a single transaction.
///
/// Returns `Ok(false)` when the status claim hits zero rows, meaning a
/// concurrent run already closed the event and this one must not re-settle.
async fn settle_event(
    pool: &PgPool,
    event: &DailyEvent,
    run_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    if !DailyEventRepo::claim_closed(&mut tx, event.id).await? {
        tx.rollback().await?;
        return Ok(false);
    }

    if let Some(kind) = EventKind::parse(&event.kind) {
        if kind.is_rank_sensitive() {
            SubmissionRepo::assign_ranks(&mut tx, event.id, kind.score_order()).await?;
        }
    }
    SubmissionRepo::award_points(&mut tx, event.id).await?;
    let penalized = PenaltyRepo::apply_missed(&mut tx, event.squad_id, event.id).await?;

    tx.commit().await?;

    tracing::info!(
        %run_id,
        event_id = event.id,
        squad_id = event.squad_id,
        penalized = penalized.len(),
        "Event settled"
    );
    Ok(true)
}

/// Post-commit steps for one settled event: crown award, then the results
/// announcement. Both are best-effort; the event stays closed regardless.
async fn finalize_event(
    pool: &PgPool,
    push: &PushClient,
    event: &DailyEvent,
    run_id: Uuid,
) -> DispatchReport {
    match crown::award_for_event(pool, event.id).await {
        Ok(award) => {
            if let (true, Some(crown)) = (award.newly_granted, &award.crown) {
                tracing::info!(
                    %run_id,
                    event_id = event.id,
                    user_id = crown.user_id,
                    "Crown granted to event winner"
                );
            }
        }
        Err(err) => {
            tracing::warn!(
                %run_id,
                event_id = event.id,
                error = %err,
                "Crown award failed after close"
            );
        }
    }

    match closed_messages(pool, event).await {
        Ok(messages) => push.dispatch(messages).await,
        Err(err) => {
            tracing::warn!(
                %run_id,
                event_id = event.id,
                error = %err,
                "Failed to build results notifications"
            );
            DispatchReport::default()
        }
    }
}

async fn closed_messages(
    pool: &PgPool,
    event: &DailyEvent,
) -> Result<Vec<PushMessage>, sqlx::Error> {
    let Some(squad) = SquadRepo::find_by_id(pool, event.squad_id).await? else {
        return Ok(Vec::new());
    };
    let tokens = DeviceTokenRepo::tokens_for_squad(pool, event.squad_id).await?;
    if tokens.is_empty() {
        return Ok(Vec::new());
    }

    let winner_name = match SubmissionRepo::rank_one(pool, event.id).await? {
        Some(submission) => UserRepo::find_by_id(pool, submission.user_id)
            .await?
            .map(|user| user.display_name),
        None => None,
    };

    let copy = compose::event_closed(
        Locale::parse(&squad.locale),
        &squad.name,
        winner_name.as_deref(),
    );
    Ok(to_messages(tokens, &copy.title, &copy.body, event, "event_closed"))
}

/// Address one copy blob to every token, with the mobile app's routing
/// payload attached.
fn to_messages(
    tokens: Vec<String>,
    title: &str,
    body: &str,
    event: &DailyEvent,
    kind: &str,
) -> Vec<PushMessage> {
    tokens
        .into_iter()
        .map(|to| PushMessage {
            to,
            title: title.to_string(),
            body: body.to_string(),
            data: Some(json!({
                "type": kind,
                "eventId": event.id,
                "squadId": event.squad_id,
            })),
        })
        .collect()
}
