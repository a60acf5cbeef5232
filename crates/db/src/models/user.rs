//! User entity model.

use serde::Serialize;
use sqlx::FromRow;
use squadgame_core::types::{DbId, Timestamp};

/// A row from the `users` table.
///
/// Accounts are created by the mobile app; this service mutates only the
/// point accumulators and the missed-event counter.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub display_name: String,
    pub role: String,
    pub total_points: i32,
    pub weekly_points: i32,
    pub missed_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One row of a squad's points standings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeaderboardRow {
    pub user_id: DbId,
    pub display_name: String,
    pub total_points: i32,
    pub weekly_points: i32,
}
