//! Repository for the `device_tokens` table.

use sqlx::PgPool;
use squadgame_core::types::DbId;

use crate::models::device::DeviceToken;

const COLUMNS: &str = "id, user_id, token, platform, created_at";

pub struct DeviceTokenRepo;

impl DeviceTokenRepo {
    /// Register a push token for a user.
    ///
    /// Tokens are globally unique; re-registering an existing token moves it
    /// to the new user, which covers device handoffs and reinstalls.
    pub async fn register(
        pool: &PgPool,
        user_id: DbId,
        token: &str,
        platform: &str,
    ) -> Result<DeviceToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO device_tokens (user_id, token, platform) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (token) DO UPDATE \
                 SET user_id = EXCLUDED.user_id, platform = EXCLUDED.platform \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DeviceToken>(&query)
            .bind(user_id)
            .bind(token)
            .bind(platform)
            .fetch_one(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, token: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM device_tokens WHERE token = $1")
            .bind(token)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Every push token registered by members of a squad.
    pub async fn tokens_for_squad(
        pool: &PgPool,
        squad_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT dt.token \
             FROM device_tokens dt \
             JOIN squad_members sm ON sm.user_id = dt.user_id \
             WHERE sm.squad_id = $1 \
             ORDER BY dt.id",
        )
        .bind(squad_id)
        .fetch_all(pool)
        .await
    }
}
