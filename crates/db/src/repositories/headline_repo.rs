//! Repository for the `headlines` table.

use sqlx::PgPool;
use squadgame_core::types::{DbId, Timestamp};

use crate::models::headline::Headline;

const COLUMNS: &str = "id, crown_id, user_id, squad_id, content, created_at, expires_at";

pub struct HeadlineRepo;

impl HeadlineRepo {
    /// Set or replace the headline for a crown.
    ///
    /// One headline per crown; posting again overwrites the text and keeps
    /// the original creation time and expiry.
    pub async fn upsert(
        pool: &PgPool,
        crown_id: DbId,
        user_id: DbId,
        squad_id: DbId,
        content: &str,
        expires_at: Timestamp,
    ) -> Result<Headline, sqlx::Error> {
        let query = format!(
            "INSERT INTO headlines (crown_id, user_id, squad_id, content, expires_at) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (crown_id) DO UPDATE SET content = EXCLUDED.content \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Headline>(&query)
            .bind(crown_id)
            .bind(user_id)
            .bind(squad_id)
            .bind(content)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_crown(
        pool: &PgPool,
        crown_id: DbId,
    ) -> Result<Option<Headline>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM headlines WHERE crown_id = $1");
        sqlx::query_as::<_, Headline>(&query)
            .bind(crown_id)
            .fetch_optional(pool)
            .await
    }

    /// The squad's currently displayed headline, if an unexpired one exists.
    pub async fn active_for_squad(
        pool: &PgPool,
        squad_id: DbId,
        now: Timestamp,
    ) -> Result<Option<Headline>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM headlines \
             WHERE squad_id = $1 AND expires_at > $2 \
             ORDER BY expires_at DESC, id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, Headline>(&query)
            .bind(squad_id)
            .bind(now)
            .fetch_optional(pool)
            .await
    }
}
