//! Route definitions for the cron job endpoints.
//!
//! These live at the server root (NOT under `/api/v1`) because the external
//! scheduler is configured with bare paths. Every handler authenticates via
//! the [`CronAuth`](crate::middleware::cron_auth::CronAuth) extractor, so no
//! middleware layer is needed here.

use axum::routing::post;
use axum::Router;

use crate::handlers::jobs;
use crate::state::AppState;

/// Cron job routes mounted at the server root.
///
/// ```text
/// POST /generate-daily-events -> schedule today's events
/// POST /open-events           -> open due events + notify
/// POST /close-events          -> settle due events + crown
/// POST /weekly-reset          -> zero weekly leaderboards
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate-daily-events", post(jobs::generate_daily_events))
        .route("/open-events", post(jobs::open_events))
        .route("/close-events", post(jobs::close_events))
        .route("/weekly-reset", post(jobs::weekly_reset))
}
