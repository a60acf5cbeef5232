//! Device push-token model.

use serde::Serialize;
use sqlx::FromRow;
use squadgame_core::types::{DbId, Timestamp};

/// A row from the `device_tokens` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DeviceToken {
    pub id: DbId,
    pub user_id: DbId,
    pub token: String,
    pub platform: String,
    pub created_at: Timestamp,
}
