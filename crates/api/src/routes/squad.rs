//! Route definitions for squad-scoped reads.
//!
//! Everything here is a GET gated on squad membership; the handlers call
//! `ensure_member` before touching any rows.

use axum::routing::get;
use axum::Router;

use crate::handlers::{crown, squad};
use crate::state::AppState;

/// Squad-scoped routes mounted at `/squads`.
///
/// ```text
/// GET /{id}/crown       -> get_active_crown
/// GET /{id}/crown/me    -> get_my_crown
/// GET /{id}/headline    -> get_active_headline
/// GET /{id}/rivalry     -> get_active_rivalry
/// GET /{id}/rivals      -> check_rivals (?user_a=&user_b=)
/// GET /{id}/leaderboard -> get_leaderboard
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/crown", get(crown::get_active_crown))
        .route("/{id}/crown/me", get(crown::get_my_crown))
        .route("/{id}/headline", get(crown::get_active_headline))
        .route("/{id}/rivalry", get(crown::get_active_rivalry))
        .route("/{id}/rivals", get(crown::check_rivals))
        .route("/{id}/leaderboard", get(squad::get_leaderboard))
}
