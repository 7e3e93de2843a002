use sqlx::PgPool;
use uuid::Uuid;

use crate::models::event::{Event, ValidatedEvent};

const EVENT_COLUMNS: &str = "id, organizer_id, name, date, description, created_at";

/// CRUD for the `events` table. Events are never updated or deleted;
/// the directory only grows.
pub struct EventRepo;

impl EventRepo {
    pub async fn create(
        pool: &PgPool,
        organizer_id: Uuid,
        input: &ValidatedEvent,
    ) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (organizer_id, name, date, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {EVENT_COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(organizer_id)
            .bind(&input.name)
            .bind(input.date)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Every event, soonest first. The public attendee view.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY date ASC");
        sqlx::query_as::<_, Event>(&query).fetch_all(pool).await
    }

    /// Events owned by one organizer, soonest first.
    pub async fn list_for_organizer(
        pool: &PgPool,
        organizer_id: Uuid,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {EVENT_COLUMNS} FROM events
             WHERE organizer_id = $1
             ORDER BY date ASC"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(organizer_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
