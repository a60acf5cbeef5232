//! Route definitions for daily events.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::event;
use crate::state::AppState;

/// Event routes mounted at `/events`.
///
/// ```text
/// GET  /{id}             -> get_event (squad members only)
/// POST /{id}/submissions -> submit_score (open window only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(event::get_event))
        .route("/{id}/submissions", post(event::submit_score))
}
