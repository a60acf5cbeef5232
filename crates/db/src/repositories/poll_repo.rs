//! Repository for the `poll_questions` table.

use sqlx::PgPool;
use squadgame_core::types::DbId;

use crate::models::poll::PollQuestion;

const COLUMNS: &str = "id, question, options, is_active, created_at";

pub struct PollRepo;

impl PollRepo {
    /// Draw a random active question for a poll event. `None` when the pool
    /// is empty; the scheduler then falls back to a non-poll kind.
    pub async fn draw_active(pool: &PgPool) -> Result<Option<PollQuestion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM poll_questions \
             WHERE is_active \
             ORDER BY random() \
             LIMIT 1"
        );
        sqlx::query_as::<_, PollQuestion>(&query).fetch_optional(pool).await
    }

    pub async fn create(
        pool: &PgPool,
        question: &str,
        options: &serde_json::Value,
    ) -> Result<PollQuestion, sqlx::Error> {
        let query = format!(
            "INSERT INTO poll_questions (question, options) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PollQuestion>(&query)
            .bind(question)
            .bind(options)
            .fetch_one(pool)
            .await
    }

    /// Activate or retire a question. Returns `false` for an unknown id.
    pub async fn set_active(
        pool: &PgPool,
        question_id: DbId,
        is_active: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE poll_questions SET is_active = $2 WHERE id = $1")
            .bind(question_id)
            .bind(is_active)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
