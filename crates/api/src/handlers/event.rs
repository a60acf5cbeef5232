//! Handlers for event participation.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use squadgame_core::error::CoreError;
use squadgame_core::event::EventStatus;
use squadgame_core::types::DbId;
use squadgame_db::repositories::{DailyEventRepo, SubmissionRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_member;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body for `POST /events/{id}/submissions`.
#[derive(Debug, Deserialize)]
pub struct SubmitScoreRequest {
    pub score: i32,
}

/// POST /events/{id}/submissions
///
/// Record the caller's entry for an open event. One submission per
/// (event, user); a repeat call replaces the score.
pub async fn submit_score(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<SubmitScoreRequest>,
) -> AppResult<impl IntoResponse> {
    let event = DailyEventRepo::find_by_id(&state.pool, event_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DailyEvent",
            id: event_id,
        }))?;

    ensure_member(&state.pool, event.squad_id, auth.user_id).await?;

    if event.status != EventStatus::Open.as_str() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Event is {}, not open",
            event.status
        ))));
    }

    let submission = SubmissionRepo::upsert(&state.pool, event_id, auth.user_id, input.score).await?;

    tracing::info!(
        user_id = auth.user_id,
        event_id,
        score = input.score,
        "Score submitted"
    );

    Ok(Json(DataResponse { data: submission }))
}

/// GET /events/{id}
///
/// Fetch a single event. Member-only, like every squad-scoped read.
pub async fn get_event(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let event = DailyEventRepo::find_by_id(&state.pool, event_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DailyEvent",
            id: event_id,
        }))?;

    ensure_member(&state.pool, event.squad_id, auth.user_id).await?;

    Ok(Json(DataResponse { data: event }))
}
