//! Headline model.

use serde::Serialize;
use sqlx::FromRow;
use squadgame_core::types::{DbId, Timestamp};

/// A row from the `headlines` table. One per crown, replaced on repeat calls.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Headline {
    pub id: DbId,
    pub crown_id: DbId,
    pub user_id: DbId,
    pub squad_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}
