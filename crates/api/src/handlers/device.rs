//! Handlers for the device push-token registry.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use squadgame_db::repositories::DeviceTokenRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body for `POST /devices`.
#[derive(Debug, Deserialize)]
pub struct RegisterDeviceRequest {
    pub token: String,
    /// Defaults to `expo` when the client omits it.
    pub platform: Option<String>,
}

/// POST /devices
///
/// Register the caller's push token. A token already registered to another
/// account moves to the caller, covering device hand-offs and re-logins.
pub async fn register_device(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<RegisterDeviceRequest>,
) -> AppResult<impl IntoResponse> {
    let device = DeviceTokenRepo::register(
        &state.pool,
        auth.user_id,
        &input.token,
        input.platform.as_deref().unwrap_or("expo"),
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        device_id = device.id,
        platform = %device.platform,
        "Device token registered"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: device })))
}

/// DELETE /devices/{token}
///
/// Remove a push token (logout, notification opt-out). Idempotent: deleting
/// an unknown token still answers 204.
pub async fn unregister_device(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<impl IntoResponse> {
    let deleted = DeviceTokenRepo::delete(&state.pool, &token).await?;

    if deleted {
        tracing::info!(user_id = auth.user_id, "Device token removed");
    }

    Ok(StatusCode::NO_CONTENT)
}
