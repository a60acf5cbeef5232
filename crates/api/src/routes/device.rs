//! Route definitions for push notification device tokens.

use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::device;
use crate::state::AppState;

/// Device token routes mounted at `/devices`.
///
/// ```text
/// POST   /        -> register_device
/// DELETE /{token} -> unregister_device (idempotent)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(device::register_device))
        .route("/{token}", delete(device::unregister_device))
}
