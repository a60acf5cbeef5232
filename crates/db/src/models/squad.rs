//! Squad entity models.

use serde::Serialize;
use sqlx::FromRow;
use squadgame_core::types::{DbId, Timestamp};

/// A row from the `squads` table.
///
/// The timezone is an IANA zone name and drives the daily window draw;
/// the locale picks the push-notification copy.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Squad {
    pub id: DbId,
    pub name: String,
    pub timezone: String,
    pub locale: String,
    pub created_at: Timestamp,
}
