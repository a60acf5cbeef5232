//! Handlers for the crown ledger: awards, headlines, rivalries, and the
//! squad-scoped reads.
//!
//! Every write validates its full precondition chain before touching the
//! database row, and each failed precondition keeps its own error code so
//! the app can show a specific message. The award procedure is shared with
//! the close engine, which invokes it best-effort after settlement.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;

use squadgame_core::crown::{authorize_holder, CrownError};
use squadgame_core::error::CoreError;
use squadgame_core::headline::validate_headline;
use squadgame_core::rivalry::{validate_rival_pair, RivalryError};
use squadgame_core::types::{DbId, Timestamp};
use squadgame_db::models::crown::CrownHolder;
use squadgame_db::repositories::{
    CrownRepo, DailyEventRepo, DeviceTokenRepo, HeadlineRepo, RivalryRepo, SquadRepo,
    SubmissionRepo, UserRepo,
};
use squadgame_notify::{compose, Locale, PushMessage};

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_member;
use crate::middleware::auth::AuthUser;
use crate::middleware::cron_auth::CronAuth;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response payloads
// ---------------------------------------------------------------------------

/// Body for `POST /crowns/award`.
#[derive(Debug, Deserialize)]
pub struct AwardCrownRequest {
    pub event_id: DbId,
}

/// Body for `POST /headlines`.
#[derive(Debug, Deserialize)]
pub struct CreateHeadlineRequest {
    pub crown_id: DbId,
    pub content: String,
}

/// Body for `POST /rivalries`.
#[derive(Debug, Deserialize)]
pub struct DeclareRivalryRequest {
    pub crown_id: DbId,
    pub rival1_user_id: DbId,
    pub rival2_user_id: DbId,
}

/// Outcome of the award procedure. `crown` is `None` when the event closed
/// without a ranked winner, which is a successful no-crown outcome, not an
/// error.
#[derive(Debug, Serialize)]
pub struct CrownAward {
    pub crown: Option<CrownHolder>,
    pub newly_granted: bool,
}

/// Payload for the caller-specific holder check.
#[derive(Debug, Serialize)]
pub struct HolderStatus {
    pub is_holder: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<Timestamp>,
}

/// Query parameters for the rivals check.
#[derive(Debug, Deserialize)]
pub struct RivalsParams {
    pub user_a: DbId,
    pub user_b: DbId,
}

// ---------------------------------------------------------------------------
// Award procedure
// ---------------------------------------------------------------------------

/// Award the 24-hour crown for a closed event's rank-1 submission.
///
/// Idempotent: a crown already granted for this event is returned unchanged
/// with `newly_granted = false`, so re-invocation (engine retry, manual cron
/// call) never creates a second crown or moves the holder.
pub async fn award_for_event(pool: &PgPool, event_id: DbId) -> Result<CrownAward, AppError> {
    let event = DailyEventRepo::find_by_id(pool, event_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DailyEvent",
            id: event_id,
        }))?;

    let Some(winner) = SubmissionRepo::rank_one(pool, event_id).await? else {
        return Ok(CrownAward {
            crown: None,
            newly_granted: false,
        });
    };

    let (crown, newly_granted) = CrownRepo::award(
        pool,
        event.squad_id,
        winner.user_id,
        Some(event_id),
        Utc::now(),
    )
    .await?;

    Ok(CrownAward {
        crown: Some(crown),
        newly_granted,
    })
}

// ---------------------------------------------------------------------------
// Write handlers
// ---------------------------------------------------------------------------

/// POST /crowns/award
///
/// Cron-authenticated award trigger. A grant that actually happened here
/// (rather than being deduplicated) also announces the new holder.
pub async fn award_crown(
    _cron: CronAuth,
    State(state): State<AppState>,
    Json(input): Json<AwardCrownRequest>,
) -> AppResult<impl IntoResponse> {
    let award = award_for_event(&state.pool, input.event_id).await?;

    if award.newly_granted {
        if let Some(ref crown) = award.crown {
            tracing::info!(
                event_id = input.event_id,
                user_id = crown.user_id,
                squad_id = crown.squad_id,
                "Crown granted"
            );
            announce_crown(&state, crown).await;
        }
    }

    Ok(Json(DataResponse { data: award }))
}

/// POST /headlines
///
/// Create or replace the caller's headline for their crown.
pub async fn create_headline(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateHeadlineRequest>,
) -> AppResult<impl IntoResponse> {
    let crown = CrownRepo::find_by_id(&state.pool, input.crown_id)
        .await?
        .ok_or(AppError::Crown(CrownError::NotFound))?;

    authorize_holder(crown.user_id, auth.user_id, crown.expires_at, Utc::now())?;
    let content = validate_headline(&input.content)?;

    let headline = HeadlineRepo::upsert(
        &state.pool,
        crown.id,
        auth.user_id,
        crown.squad_id,
        content,
        crown.expires_at,
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        crown_id = crown.id,
        squad_id = crown.squad_id,
        "Headline set"
    );

    Ok(Json(DataResponse { data: headline }))
}

/// POST /rivalries
///
/// Declare (or replace) the rivalry attached to the caller's crown.
pub async fn declare_rivalry(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<DeclareRivalryRequest>,
) -> AppResult<impl IntoResponse> {
    let crown = CrownRepo::find_by_id(&state.pool, input.crown_id)
        .await?
        .ok_or(AppError::Crown(CrownError::NotFound))?;

    authorize_holder(crown.user_id, auth.user_id, crown.expires_at, Utc::now())?;
    validate_rival_pair(auth.user_id, input.rival1_user_id, input.rival2_user_id)?;

    let both = SquadRepo::both_members(
        &state.pool,
        crown.squad_id,
        input.rival1_user_id,
        input.rival2_user_id,
    )
    .await?;
    if !both {
        return Err(AppError::Rivalry(RivalryError::NotSquadMember));
    }

    let rivalry = RivalryRepo::upsert(
        &state.pool,
        crown.id,
        auth.user_id,
        input.rival1_user_id,
        input.rival2_user_id,
        crown.squad_id,
        crown.expires_at,
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        crown_id = crown.id,
        rival1 = input.rival1_user_id,
        rival2 = input.rival2_user_id,
        "Rivalry declared"
    );

    Ok(Json(DataResponse { data: rivalry }))
}

// ---------------------------------------------------------------------------
// Squad-scoped reads
// ---------------------------------------------------------------------------

/// GET /squads/{id}/crown
///
/// The squad's currently active crown, or `null`.
pub async fn get_active_crown(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(squad_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_member(&state.pool, squad_id, auth.user_id).await?;
    let crown = CrownRepo::active_for_squad(&state.pool, squad_id, Utc::now()).await?;
    Ok(Json(DataResponse { data: crown }))
}

/// GET /squads/{id}/crown/me
///
/// Whether the caller holds the squad's active crown.
pub async fn get_my_crown(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(squad_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_member(&state.pool, squad_id, auth.user_id).await?;
    let crown = CrownRepo::active_for_squad(&state.pool, squad_id, Utc::now()).await?;

    let status = match crown {
        Some(ref c) if c.user_id == auth.user_id => HolderStatus {
            is_holder: true,
            expires_at: Some(c.expires_at),
        },
        _ => HolderStatus {
            is_holder: false,
            expires_at: None,
        },
    };
    Ok(Json(DataResponse { data: status }))
}

/// GET /squads/{id}/headline
///
/// The squad's currently active headline, or `null`.
pub async fn get_active_headline(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(squad_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_member(&state.pool, squad_id, auth.user_id).await?;
    let headline = HeadlineRepo::active_for_squad(&state.pool, squad_id, Utc::now()).await?;
    Ok(Json(DataResponse { data: headline }))
}

/// GET /squads/{id}/rivalry
///
/// The squad's currently active rivalry, or `null`.
pub async fn get_active_rivalry(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(squad_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_member(&state.pool, squad_id, auth.user_id).await?;
    let rivalry = RivalryRepo::active_for_squad(&state.pool, squad_id, Utc::now()).await?;
    Ok(Json(DataResponse { data: rivalry }))
}

/// GET /squads/{id}/rivals?user_a=&user_b=
///
/// Whether the two users are currently declared rivals. Symmetric: the
/// order of `user_a` / `user_b` never matters.
pub async fn check_rivals(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(squad_id): Path<DbId>,
    Query(params): Query<RivalsParams>,
) -> AppResult<impl IntoResponse> {
    ensure_member(&state.pool, squad_id, auth.user_id).await?;
    let are_rivals = RivalryRepo::are_rivals(
        &state.pool,
        squad_id,
        params.user_a,
        params.user_b,
        Utc::now(),
    )
    .await?;
    Ok(Json(DataResponse {
        data: json!({ "are_rivals": are_rivals }),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Best-effort "new crown holder" push to the squad. Failures are logged
/// and swallowed; the grant has already been persisted.
async fn announce_crown(state: &AppState, crown: &CrownHolder) {
    let result: Result<(), sqlx::Error> = async {
        let Some(squad) = SquadRepo::find_by_id(&state.pool, crown.squad_id).await? else {
            return Ok(());
        };
        let Some(winner) = UserRepo::find_by_id(&state.pool, crown.user_id).await? else {
            return Ok(());
        };
        let tokens = DeviceTokenRepo::tokens_for_squad(&state.pool, crown.squad_id).await?;
        if tokens.is_empty() {
            return Ok(());
        }

        let copy = compose::crown_awarded(Locale::parse(&squad.locale), &winner.display_name);
        let messages = tokens
            .into_iter()
            .map(|to| PushMessage {
                to,
                title: copy.title.clone(),
                body: copy.body.clone(),
                data: Some(json!({
                    "type": "crown_awarded",
                    "squadId": crown.squad_id,
                    "userId": crown.user_id,
                })),
            })
            .collect();

        let report = state.push.dispatch(messages).await;
        tracing::info!(
            crown_id = crown.id,
            notified = report.sent(),
            notify_failed = report.failed(),
            "Crown announcement dispatched"
        );
        Ok(())
    }
    .await;

    if let Err(err) = result {
        tracing::warn!(crown_id = crown.id, error = %err, "Crown announcement failed");
    }
}
