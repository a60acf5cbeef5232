//! Rivalry model.

use serde::Serialize;
use sqlx::FromRow;
use squadgame_core::types::{DbId, Timestamp};

/// A row from the `active_rivalries` table. One per crown, replaced on
/// repeat calls; the rival pair is unordered for matching purposes.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActiveRivalry {
    pub id: DbId,
    pub crown_id: DbId,
    pub declared_by: DbId,
    pub rival1_user_id: DbId,
    pub rival2_user_id: DbId,
    pub squad_id: DbId,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}
