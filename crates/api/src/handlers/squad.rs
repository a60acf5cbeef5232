//! Handlers for squad-scoped standings.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use squadgame_core::types::DbId;
use squadgame_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::handlers::ensure_member;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /squads/{id}/leaderboard
///
/// Points standings for the squad, total points first, weekly points as the
/// tiebreaker.
pub async fn get_leaderboard(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(squad_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_member(&state.pool, squad_id, auth.user_id).await?;
    let rows = UserRepo::leaderboard(&state.pool, squad_id).await?;
    Ok(Json(DataResponse { data: rows }))
}
