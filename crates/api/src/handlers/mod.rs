//! Request handlers, one module per resource.

use sqlx::PgPool;
use squadgame_core::error::CoreError;
use squadgame_core::types::DbId;
use squadgame_db::repositories::SquadRepo;

use crate::error::AppError;

pub mod crown;
pub mod device;
pub mod event;
pub mod jobs;
pub mod squad;

/// Reject callers that do not belong to the squad.
///
/// Squad-scoped reads and writes are member-only; the row-level policy from
/// the data model is enforced here because this service owns the only write
/// path.
pub(crate) async fn ensure_member(
    pool: &PgPool,
    squad_id: DbId,
    user_id: DbId,
) -> Result<(), AppError> {
    if SquadRepo::is_member(pool, squad_id, user_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "Not a member of this squad".into(),
        )))
    }
}
