//! Repository for the `active_rivalries` table.

use sqlx::PgPool;
use squadgame_core::types::{DbId, Timestamp};

use crate::models::rivalry::ActiveRivalry;

const COLUMNS: &str =
    "id, crown_id, declared_by, rival1_user_id, rival2_user_id, squad_id, created_at, expires_at";

pub struct RivalryRepo;

impl RivalryRepo {
    /// Declare or replace the rivalry attached to a crown.
    ///
    /// One rivalry per crown; declaring again swaps in the new pair while the
    /// original expiry stands.
    pub async fn upsert(
        pool: &PgPool,
        crown_id: DbId,
        declared_by: DbId,
        rival1: DbId,
        rival2: DbId,
        squad_id: DbId,
        expires_at: Timestamp,
    ) -> Result<ActiveRivalry, sqlx::Error> {
        let query = format!(
            "INSERT INTO active_rivalries \
                (crown_id, declared_by, rival1_user_id, rival2_user_id, squad_id, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (crown_id) DO UPDATE \
                 SET rival1_user_id = EXCLUDED.rival1_user_id, \
                     rival2_user_id = EXCLUDED.rival2_user_id \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActiveRivalry>(&query)
            .bind(crown_id)
            .bind(declared_by)
            .bind(rival1)
            .bind(rival2)
            .bind(squad_id)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_crown(
        pool: &PgPool,
        crown_id: DbId,
    ) -> Result<Option<ActiveRivalry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM active_rivalries WHERE crown_id = $1");
        sqlx::query_as::<_, ActiveRivalry>(&query)
            .bind(crown_id)
            .fetch_optional(pool)
            .await
    }

    /// The squad's current rivalry, if an unexpired one exists.
    pub async fn active_for_squad(
        pool: &PgPool,
        squad_id: DbId,
        now: Timestamp,
    ) -> Result<Option<ActiveRivalry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM active_rivalries \
             WHERE squad_id = $1 AND expires_at > $2 \
             ORDER BY expires_at DESC, id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, ActiveRivalry>(&query)
            .bind(squad_id)
            .bind(now)
            .fetch_optional(pool)
            .await
    }

    /// Whether the two users are the rival pair of any unexpired rivalry in
    /// the squad, in either order.
    pub async fn are_rivals(
        pool: &PgPool,
        squad_id: DbId,
        user_a: DbId,
        user_b: DbId,
        now: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS( \
                SELECT 1 FROM active_rivalries \
                WHERE squad_id = $1 \
                  AND expires_at > $4 \
                  AND ((rival1_user_id = $2 AND rival2_user_id = $3) \
                    OR (rival1_user_id = $3 AND rival2_user_id = $2)) \
             )",
        )
        .bind(squad_id)
        .bind(user_a)
        .bind(user_b)
        .bind(now)
        .fetch_one(pool)
        .await
    }
}
