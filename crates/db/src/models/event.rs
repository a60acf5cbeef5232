//! Daily event, submission, and penalty models.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use squadgame_core::event::EventKind;
use squadgame_core::types::{DbId, Timestamp};

/// A row from the `daily_events` table.
///
/// `kind` and `status` are stored as text; parse them with
/// [`EventKind::parse`] / [`EventStatus::parse`](squadgame_core::event::EventStatus::parse)
/// where the semantics matter.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DailyEvent {
    pub id: DbId,
    pub squad_id: DbId,
    pub event_date: NaiveDate,
    pub kind: String,
    pub status: String,
    pub open_at: Timestamp,
    pub close_at: Timestamp,
    pub judge_user_id: Option<DbId>,
    pub poll_question: Option<String>,
    pub poll_options: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for scheduling a new daily event. Built by the scheduler engine,
/// never deserialized from a request.
#[derive(Debug, Clone)]
pub struct CreateDailyEvent {
    pub squad_id: DbId,
    pub event_date: NaiveDate,
    pub kind: EventKind,
    pub open_at: Timestamp,
    pub close_at: Timestamp,
    pub judge_user_id: Option<DbId>,
    pub poll_question: Option<String>,
    pub poll_options: Option<serde_json::Value>,
}

/// A row from the `event_submissions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventSubmission {
    pub id: DbId,
    pub event_id: DbId,
    pub user_id: DbId,
    pub score: i32,
    pub rank: Option<i32>,
    pub submitted_at: Timestamp,
}

/// A row from the `event_penalties` guard table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventPenalty {
    pub event_id: DbId,
    pub user_id: DbId,
    pub points: i32,
    pub applied_at: Timestamp,
}
