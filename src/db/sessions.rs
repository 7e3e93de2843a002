use sqlx::PgPool;
use uuid::Uuid;

use crate::models::organizer::Organizer;
use crate::models::session::Session;

/// CRUD for the `sessions` table. Tokens are random v4 UUIDs minted at
/// login; possession of the token is the whole credential.
pub struct SessionRepo;

impl SessionRepo {
    pub async fn create(pool: &PgPool, organizer_id: Uuid) -> Result<Session, sqlx::Error> {
        sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (token, organizer_id)
             VALUES ($1, $2)
             RETURNING token, organizer_id, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(organizer_id)
        .fetch_one(pool)
        .await
    }

    /// Resolve a bearer token to its organizer, or `None` when the token
    /// is unknown (expired by logout, or never issued).
    pub async fn find_organizer(
        pool: &PgPool,
        token: Uuid,
    ) -> Result<Option<Organizer>, sqlx::Error> {
        sqlx::query_as::<_, Organizer>(
            "SELECT o.id, o.email, o.password_hash, o.created_at
             FROM sessions s
             JOIN organizers o ON o.id = s.organizer_id
             WHERE s.token = $1",
        )
        .bind(token)
        .fetch_optional(pool)
        .await
    }

    /// Delete a session, returning whether a row was removed.
    pub async fn delete(pool: &PgPool, token: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
