//! Repository for the `crown_holders` table.

use sqlx::PgPool;
use squadgame_core::crown;
use squadgame_core::types::{DbId, Timestamp};

use crate::models::crown::CrownHolder;

const COLUMNS: &str = "id, user_id, squad_id, event_id, granted_at, expires_at";

pub struct CrownRepo;

impl CrownRepo {
    /// Crown `user_id` for 24 hours, optionally tied to the event they won.
    ///
    /// Event-sourced awards are deduplicated by `uq_crown_holders_squad_event`:
    /// when an earlier run already crowned this event's winner, the existing
    /// crown is returned with the flag set to `false`.
    pub async fn award(
        pool: &PgPool,
        squad_id: DbId,
        user_id: DbId,
        event_id: Option<DbId>,
        granted_at: Timestamp,
    ) -> Result<(CrownHolder, bool), sqlx::Error> {
        let expires_at = crown::expiry_from(granted_at);
        let query = format!(
            "INSERT INTO crown_holders (user_id, squad_id, event_id, granted_at, expires_at) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (squad_id, event_id) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, CrownHolder>(&query)
            .bind(user_id)
            .bind(squad_id)
            .bind(event_id)
            .bind(granted_at)
            .bind(expires_at)
            .fetch_optional(pool)
            .await?;
        if let Some(holder) = inserted {
            return Ok((holder, true));
        }
        // The conflict can only fire for event-sourced awards; fetch the
        // crown the earlier run granted.
        let query = format!(
            "SELECT {COLUMNS} FROM crown_holders WHERE squad_id = $1 AND event_id = $2"
        );
        let existing = sqlx::query_as::<_, CrownHolder>(&query)
            .bind(squad_id)
            .bind(event_id)
            .fetch_one(pool)
            .await?;
        Ok((existing, false))
    }

    pub async fn find_by_id(
        pool: &PgPool,
        crown_id: DbId,
    ) -> Result<Option<CrownHolder>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM crown_holders WHERE id = $1");
        sqlx::query_as::<_, CrownHolder>(&query)
            .bind(crown_id)
            .fetch_optional(pool)
            .await
    }

    /// The squad's current, unexpired crown, newest first when several
    /// overlap.
    pub async fn active_for_squad(
        pool: &PgPool,
        squad_id: DbId,
        now: Timestamp,
    ) -> Result<Option<CrownHolder>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM crown_holders \
             WHERE squad_id = $1 AND expires_at > $2 \
             ORDER BY granted_at DESC, id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, CrownHolder>(&query)
            .bind(squad_id)
            .bind(now)
            .fetch_optional(pool)
            .await
    }
}
