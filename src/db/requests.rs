use sqlx::PgPool;
use uuid::Uuid;

use crate::models::request::{RequestStatus, SongRequest, ValidatedRequest};

const REQUEST_COLUMNS: &str =
    "id, event_id, song_name, artist, special_request, tip_amount, status, created_at";

/// CRUD for the `requests` table.
pub struct RequestRepo;

impl RequestRepo {
    /// Insert a new submission. The status column defaults to `pending`
    /// in the schema; callers cannot choose an initial status.
    pub async fn create(
        pool: &PgPool,
        event_id: Uuid,
        input: &ValidatedRequest,
    ) -> Result<SongRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO requests (event_id, song_name, artist, special_request, tip_amount)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {REQUEST_COLUMNS}"
        );
        sqlx::query_as::<_, SongRequest>(&query)
            .bind(event_id)
            .bind(&input.song_name)
            .bind(&input.artist)
            .bind(&input.special_request)
            .bind(input.tip_amount)
            .fetch_one(pool)
            .await
    }

    /// All requests for an event, newest submission first.
    pub async fn list_for_event(
        pool: &PgPool,
        event_id: Uuid,
    ) -> Result<Vec<SongRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {REQUEST_COLUMNS} FROM requests
             WHERE event_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, SongRequest>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<SongRequest>, sqlx::Error> {
        let query = format!("SELECT {REQUEST_COLUMNS} FROM requests WHERE id = $1");
        sqlx::query_as::<_, SongRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Organizer of the event a request belongs to. Authority over a
    /// request is derived transitively through its event.
    pub async fn organizer_for_request(
        pool: &PgPool,
        request_id: Uuid,
    ) -> Result<Option<Uuid>, sqlx::Error> {
        let row: Option<(Uuid,)> = sqlx::query_as(
            "SELECT e.organizer_id
             FROM requests r
             JOIN events e ON e.id = r.event_id
             WHERE r.id = $1",
        )
        .bind(request_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(organizer_id,)| organizer_id))
    }

    /// Overwrite the status of a single request, returning the updated row.
    pub async fn set_status(
        pool: &PgPool,
        id: Uuid,
        status: RequestStatus,
    ) -> Result<SongRequest, sqlx::Error> {
        let query = format!(
            "UPDATE requests SET status = $2
             WHERE id = $1
             RETURNING {REQUEST_COLUMNS}"
        );
        sqlx::query_as::<_, SongRequest>(&query)
            .bind(id)
            .bind(status)
            .fetch_one(pool)
            .await
    }
}
