//! Handlers for the root-level cron trigger endpoints.
//!
//! One endpoint per scheduled job. All four are gated by [`CronAuth`] and
//! answer with a [`JobResponse`] summary; an unhandled engine failure
//! surfaces as the standard 500 `{error, code}` body.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use squadgame_core::types::{DbId, Timestamp};

use crate::error::AppResult;
use crate::jobs::{scheduler, transition, weekly};
use crate::middleware::cron_auth::CronAuth;
use crate::state::AppState;

/// Response payload for the cron trigger endpoints.
///
/// Camel-cased `eventIds` is part of the external scheduler's contract and
/// predates the snake_case `/api/v1` conventions.
#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub message: String,
    #[serde(rename = "eventIds", skip_serializing_if = "Option::is_none")]
    pub event_ids: Option<Vec<DbId>>,
    pub timestamp: Timestamp,
}

/// POST /generate-daily-events
///
/// Run the daily scheduler for every squad.
pub async fn generate_daily_events(
    _cron: CronAuth,
    State(state): State<AppState>,
) -> AppResult<Json<JobResponse>> {
    let report = scheduler::generate_daily_events(&state.pool).await?;

    Ok(Json(JobResponse {
        message: format!(
            "Scheduled {} events ({} skipped, {} failed)",
            report.created.len(),
            report.skipped,
            report.failed
        ),
        event_ids: None,
        timestamp: Utc::now(),
    }))
}

/// POST /open-events
///
/// Flip due scheduled events to open and announce them.
pub async fn open_events(
    _cron: CronAuth,
    State(state): State<AppState>,
) -> AppResult<Json<JobResponse>> {
    let report = transition::open_due_events(&state.pool, &state.push).await?;

    let message = if report.opened.is_empty() {
        "No events due to open".to_string()
    } else {
        format!(
            "Opened {} events, notified {} devices ({} failed)",
            report.opened.len(),
            report.notify.sent(),
            report.notify.failed()
        )
    };
    let event_ids = if report.opened.is_empty() {
        None
    } else {
        Some(report.opened)
    };

    Ok(Json(JobResponse {
        message,
        event_ids,
        timestamp: Utc::now(),
    }))
}

/// POST /close-events
///
/// Settle due open events and announce results. The id list is always
/// present here, even when empty.
pub async fn close_events(
    _cron: CronAuth,
    State(state): State<AppState>,
) -> AppResult<Json<JobResponse>> {
    let report = transition::close_due_events(&state.pool, &state.push).await?;

    Ok(Json(JobResponse {
        message: format!(
            "Closed {} events ({} failed)",
            report.closed.len(),
            report.failed
        ),
        event_ids: Some(report.closed),
        timestamp: Utc::now(),
    }))
}

/// POST /weekly-reset
///
/// Zero weekly points and forgive one missed event for every player.
pub async fn weekly_reset(
    _cron: CronAuth,
    State(state): State<AppState>,
) -> AppResult<Json<JobResponse>> {
    let affected = weekly::weekly_reset(&state.pool).await?;

    Ok(Json(JobResponse {
        message: format!("Weekly reset applied to {affected} players"),
        event_ids: None,
        timestamp: Utc::now(),
    }))
}
