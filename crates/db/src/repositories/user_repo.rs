//! Repository for the `users` table.

use sqlx::PgPool;
use squadgame_core::types::DbId;

use crate::models::user::{LeaderboardRow, User};

const COLUMNS: &str = "id, display_name, role, total_points, weekly_points, missed_count, \
                       created_at, updated_at";

pub struct UserRepo;

impl UserRepo {
    pub async fn create(
        pool: &PgPool,
        display_name: &str,
        role: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (display_name, role) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(display_name)
            .bind(role)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, user_id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Weekly reset applied to every player.
    ///
    /// Zeroes `weekly_points` and forgives one missed event per user
    /// (`missed_count` is decremented, floored at zero). Total points are
    /// untouched. Returns the number of affected rows.
    pub async fn weekly_reset(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users \
             SET weekly_points = 0, \
                 missed_count = GREATEST(missed_count - 1, 0), \
                 updated_at = NOW() \
             WHERE role = 'player'",
        )
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Squad leaderboard ordered by total points.
    ///
    /// Ties break on weekly points, then user id for a stable order.
    pub async fn leaderboard(
        pool: &PgPool,
        squad_id: DbId,
    ) -> Result<Vec<LeaderboardRow>, sqlx::Error> {
        sqlx::query_as::<_, LeaderboardRow>(
            "SELECT u.id AS user_id, u.display_name, u.total_points, u.weekly_points \
             FROM users u \
             JOIN squad_members sm ON sm.user_id = u.id \
             WHERE sm.squad_id = $1 \
             ORDER BY u.total_points DESC, u.weekly_points DESC, u.id ASC",
        )
        .bind(squad_id)
        .fetch_all(pool)
        .await
    }
}
