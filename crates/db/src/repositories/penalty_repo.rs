//! Repository for the `event_penalties` guard table.

use sqlx::{PgConnection, PgPool};
use squadgame_core::scoring::MISSED_PENALTY;
use squadgame_core::types::DbId;

use crate::models::event::EventPenalty;

pub struct PenaltyRepo;

impl PenaltyRepo {
    /// Penalize every squad member who skipped the event.
    ///
    /// The guard row in `event_penalties` is inserted before the point
    /// deduction, and users whose guard row already exists are excluded. A
    /// replayed settlement therefore deducts nothing. Points are floored at
    /// zero; `missed_count` always increments. Runs inside the settlement
    /// transaction. Returns the ids of newly penalized users.
    pub async fn apply_missed(
        conn: &mut PgConnection,
        squad_id: DbId,
        event_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let query = format!(
            "WITH missing AS ( \
                SELECT sm.user_id \
                FROM squad_members sm \
                WHERE sm.squad_id = $1 \
                  AND NOT EXISTS ( \
                      SELECT 1 FROM event_submissions es \
                      WHERE es.event_id = $2 AND es.user_id = sm.user_id \
                  ) \
             ), \
             inserted AS ( \
                INSERT INTO event_penalties (event_id, user_id, points) \
                SELECT $2, user_id, {MISSED_PENALTY} FROM missing \
                ON CONFLICT (event_id, user_id) DO NOTHING \
                RETURNING user_id \
             ) \
             UPDATE users AS u \
             SET total_points = GREATEST(u.total_points - {MISSED_PENALTY}, 0), \
                 weekly_points = GREATEST(u.weekly_points - {MISSED_PENALTY}, 0), \
                 missed_count = u.missed_count + 1, \
                 updated_at = NOW() \
             FROM inserted \
             WHERE u.id = inserted.user_id \
             RETURNING u.id"
        );
        sqlx::query_scalar(&query)
            .bind(squad_id)
            .bind(event_id)
            .fetch_all(conn)
            .await
    }

    pub async fn list_for_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<EventPenalty>, sqlx::Error> {
        sqlx::query_as::<_, EventPenalty>(
            "SELECT event_id, user_id, points, applied_at FROM event_penalties \
             WHERE event_id = $1 ORDER BY user_id",
        )
        .bind(event_id)
        .fetch_all(pool)
        .await
    }
}
