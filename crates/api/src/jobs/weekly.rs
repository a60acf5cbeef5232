//! Weekly reset: zero the weekly accumulators and forgive one missed event.

use sqlx::PgPool;
use uuid::Uuid;

use squadgame_db::repositories::UserRepo;

/// Reset weekly points for all players and decay each missed-event counter
/// by one toward zero. Returns the number of player rows touched.
///
/// Total points are untouched; a player's season standing survives the
/// weekly cycle.
pub async fn weekly_reset(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let run_id = Uuid::new_v4();
    let affected = UserRepo::weekly_reset(pool).await?;
    tracing::info!(%run_id, affected, "Weekly reset finished");
    Ok(affected)
}
