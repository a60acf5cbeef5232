//! Repository for the `event_submissions` table, including settlement
//! ranking and point awards.

use sqlx::{PgConnection, PgPool};
use squadgame_core::event::ScoreOrder;
use squadgame_core::scoring::{BASE_POINTS, RANK1_BONUS, RANK2_BONUS};
use squadgame_core::types::DbId;

use crate::models::event::EventSubmission;

const COLUMNS: &str = "id, event_id, user_id, score, rank, submitted_at";

pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Record a player's score for an event.
    ///
    /// A resubmission replaces the previous score and refreshes the
    /// submission time, so it also loses any earlier tie-break position.
    pub async fn upsert(
        pool: &PgPool,
        event_id: DbId,
        user_id: DbId,
        score: i32,
    ) -> Result<EventSubmission, sqlx::Error> {
        let query = format!(
            "INSERT INTO event_submissions (event_id, user_id, score) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (event_id, user_id) \
             DO UPDATE SET score = EXCLUDED.score, submitted_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EventSubmission>(&query)
            .bind(event_id)
            .bind(user_id)
            .bind(score)
            .fetch_one(pool)
            .await
    }

    pub async fn list_for_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<EventSubmission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM event_submissions \
             WHERE event_id = $1 \
             ORDER BY rank NULLS LAST, submitted_at, id"
        );
        sqlx::query_as::<_, EventSubmission>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// The rank-1 submission of a settled event, if any.
    pub async fn rank_one(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Option<EventSubmission>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM event_submissions WHERE event_id = $1 AND rank = 1");
        sqlx::query_as::<_, EventSubmission>(&query)
            .bind(event_id)
            .fetch_optional(pool)
            .await
    }

    /// Assign dense 1..N ranks to an event's submissions.
    ///
    /// Ties on score break by earlier submission time, then by id so the
    /// order is total. Runs inside the settlement transaction. Returns the
    /// number of ranked submissions.
    pub async fn assign_ranks(
        conn: &mut PgConnection,
        event_id: DbId,
        order: ScoreOrder,
    ) -> Result<u64, sqlx::Error> {
        let direction = match order {
            ScoreOrder::Ascending => "ASC",
            ScoreOrder::Descending => "DESC",
        };
        let query = format!(
            "UPDATE event_submissions AS s \
             SET rank = ranked.rn \
             FROM ( \
                SELECT id, ROW_NUMBER() OVER ( \
                    ORDER BY score {direction}, submitted_at ASC, id ASC \
                ) AS rn \
                FROM event_submissions \
                WHERE event_id = $1 \
             ) AS ranked \
             WHERE s.id = ranked.id"
        );
        let result = sqlx::query(&query).bind(event_id).execute(conn).await?;
        Ok(result.rows_affected())
    }

    /// Credit participation and placement points to every submitter.
    ///
    /// Everyone with a submission earns the base award; ranks 1 and 2 add
    /// their bonuses on top. Unranked submissions (rank-insensitive events)
    /// earn the base award only. Runs inside the settlement transaction.
    pub async fn award_points(
        conn: &mut PgConnection,
        event_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let query = format!(
            "UPDATE users AS u \
             SET total_points = u.total_points + {BASE_POINTS} + earned.bonus, \
                 weekly_points = u.weekly_points + {BASE_POINTS} + earned.bonus, \
                 updated_at = NOW() \
             FROM ( \
                SELECT user_id, \
                       CASE rank \
                           WHEN 1 THEN {RANK1_BONUS} \
                           WHEN 2 THEN {RANK2_BONUS} \
                           ELSE 0 \
                       END AS bonus \
                FROM event_submissions \
                WHERE event_id = $1 \
             ) AS earned \
             WHERE u.id = earned.user_id"
        );
        let result = sqlx::query(&query).bind(event_id).execute(conn).await?;
        Ok(result.rows_affected())
    }
}
