//! Poll question pool model.

use serde::Serialize;
use sqlx::FromRow;
use squadgame_core::types::{DbId, Timestamp};

/// A row from the `poll_questions` table. `options` is a JSON array of
/// answer strings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PollQuestion {
    pub id: DbId,
    pub question: String,
    pub options: serde_json::Value,
    pub is_active: bool,
    pub created_at: Timestamp,
}
