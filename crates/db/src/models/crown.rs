//! Crown holder model.

use serde::Serialize;
use sqlx::FromRow;
use squadgame_core::types::{DbId, Timestamp};

/// A row from the `crown_holders` table.
///
/// Crowns are never updated or deleted; they become inert once `expires_at`
/// passes. The most recently granted non-expired crown of a squad is "the"
/// active crown.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CrownHolder {
    pub id: DbId,
    pub user_id: DbId,
    pub squad_id: DbId,
    pub event_id: Option<DbId>,
    pub granted_at: Timestamp,
    pub expires_at: Timestamp,
}
