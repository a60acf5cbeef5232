//! Repository for the `squads` and `squad_members` tables.

use sqlx::PgPool;
use squadgame_core::types::DbId;

use crate::models::squad::Squad;

/// Column list for `squads` queries.
const COLUMNS: &str = "id, name, timezone, locale, created_at";

/// Provides read access to squads and membership, plus the judge draw.
pub struct SquadRepo;

impl SquadRepo {
    /// Create a squad. Used by seeding and account flows.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        timezone: &str,
        locale: &str,
    ) -> Result<Squad, sqlx::Error> {
        let query = format!(
            "INSERT INTO squads (name, timezone, locale) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Squad>(&query)
            .bind(name)
            .bind(timezone)
            .bind(locale)
            .fetch_one(pool)
            .await
    }

    /// Fetch a squad by id.
    pub async fn find_by_id(pool: &PgPool, squad_id: DbId) -> Result<Option<Squad>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM squads WHERE id = $1");
        sqlx::query_as::<_, Squad>(&query)
            .bind(squad_id)
            .fetch_optional(pool)
            .await
    }

    /// List every squad. The scheduler iterates this once per daily run.
    pub async fn list(pool: &PgPool) -> Result<Vec<Squad>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM squads ORDER BY id");
        sqlx::query_as::<_, Squad>(&query).fetch_all(pool).await
    }

    /// Add a user to a squad. Re-adding an existing member is a no-op.
    pub async fn add_member(
        pool: &PgPool,
        squad_id: DbId,
        user_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO squad_members (squad_id, user_id) \
             VALUES ($1, $2) \
             ON CONFLICT (squad_id, user_id) DO NOTHING",
        )
        .bind(squad_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// All member user ids of a squad.
    pub async fn member_ids(pool: &PgPool, squad_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT user_id FROM squad_members WHERE squad_id = $1 ORDER BY user_id")
            .bind(squad_id)
            .fetch_all(pool)
            .await
    }

    /// Whether `user_id` belongs to `squad_id`.
    pub async fn is_member(
        pool: &PgPool,
        squad_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS( \
                SELECT 1 FROM squad_members WHERE squad_id = $1 AND user_id = $2 \
             )",
        )
        .bind(squad_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Whether both (distinct) users belong to `squad_id`.
    pub async fn both_members(
        pool: &PgPool,
        squad_id: DbId,
        user_a: DbId,
        user_b: DbId,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM squad_members \
             WHERE squad_id = $1 AND user_id = ANY(ARRAY[$2, $3])",
        )
        .bind(squad_id)
        .bind(user_a)
        .bind(user_b)
        .fetch_one(pool)
        .await?;
        Ok(count == 2)
    }

    /// Draw a uniformly random member to judge today's event.
    ///
    /// Returns `None` for an empty squad; the event is then created with no
    /// judge.
    pub async fn pick_random_member(
        pool: &PgPool,
        squad_id: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT user_id FROM squad_members \
             WHERE squad_id = $1 \
             ORDER BY random() \
             LIMIT 1",
        )
        .bind(squad_id)
        .fetch_optional(pool)
        .await
    }
}
