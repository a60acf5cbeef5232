//! Route definitions for the crown system and its 24h perks.
//!
//! Three routers are provided:
//! - `router()` for crown management mounted at `/crowns`
//! - `headline_router()` for headline publishing at `/headlines`
//! - `rivalry_router()` for rivalry declarations at `/rivalries`
//!
//! Squad-scoped reads (active crown, headline, rivalry) live under
//! `/squads/{id}/...` in [`super::squad`].

use axum::routing::post;
use axum::Router;

use crate::handlers::crown;
use crate::state::AppState;

/// Crown management routes mounted at `/crowns`.
///
/// ```text
/// POST /award -> award_crown (cron / service auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/award", post(crown::award_crown))
}

/// Headline routes mounted at `/headlines`.
///
/// ```text
/// POST / -> create_headline (crown holder only)
/// ```
pub fn headline_router() -> Router<AppState> {
    Router::new().route("/", post(crown::create_headline))
}

/// Rivalry routes mounted at `/rivalries`.
///
/// ```text
/// POST / -> declare_rivalry (crown holder only)
/// ```
pub fn rivalry_router() -> Router<AppState> {
    Router::new().route("/", post(crown::declare_rivalry))
}
