pub mod crown;
pub mod device;
pub mod event;
pub mod health;
pub mod jobs;
pub mod squad;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /crowns/award             award crown for a closed event (cron / service)
///
/// /headlines                publish headline (crown holder only, POST)
/// /rivalries                declare rivalry (crown holder only, POST)
///
/// /squads/{id}/crown        active crown for squad (GET)
/// /squads/{id}/crown/me     caller's holder status (GET)
/// /squads/{id}/headline     active headline (GET)
/// /squads/{id}/rivalry      active rivalry (GET)
/// /squads/{id}/rivals       rivalry membership check (GET, ?user_a=&user_b=)
/// /squads/{id}/leaderboard  weekly + total standings (GET)
///
/// /events/{id}              event details (GET, squad members)
/// /events/{id}/submissions  submit or update a score (POST, open window)
///
/// /devices                  register push token (POST)
/// /devices/{token}          unregister push token (DELETE)
/// ```
///
/// Cron endpoints (`/generate-daily-events` etc.) and `/health` are mounted
/// at the server root instead; see [`crate::router::build_app_router`].
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Crown awards (service-authenticated).
        .nest("/crowns", crown::router())
        // Crown-holder perks: headline + rivalry declarations.
        .nest("/headlines", crown::headline_router())
        .nest("/rivalries", crown::rivalry_router())
        // Squad-scoped reads (membership-gated).
        .nest("/squads", squad::router())
        // Daily event details and score submissions.
        .nest("/events", event::router())
        // Push token registration.
        .nest("/devices", device::router())
}
