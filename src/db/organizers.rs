use sqlx::PgPool;
use uuid::Uuid;

use crate::models::organizer::Organizer;

const ORGANIZER_COLUMNS: &str = "id, email, password_hash, created_at";

/// CRUD for the `organizers` table.
pub struct OrganizerRepo;

impl OrganizerRepo {
    /// Insert a new organizer, returning the created row. A duplicate
    /// email surfaces as a unique-constraint database error.
    pub async fn create(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
    ) -> Result<Organizer, sqlx::Error> {
        let query = format!(
            "INSERT INTO organizers (email, password_hash)
             VALUES ($1, $2)
             RETURNING {ORGANIZER_COLUMNS}"
        );
        sqlx::query_as::<_, Organizer>(&query)
            .bind(email)
            .bind(password_hash)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Organizer>, sqlx::Error> {
        let query = format!("SELECT {ORGANIZER_COLUMNS} FROM organizers WHERE email = $1");
        sqlx::query_as::<_, Organizer>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Organizer>, sqlx::Error> {
        let query = format!("SELECT {ORGANIZER_COLUMNS} FROM organizers WHERE id = $1");
        sqlx::query_as::<_, Organizer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
