use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::organizer::Organizer;

/// One row of the `sessions` table. The token is the opaque bearer
/// credential handed to the client at login; logout deletes the row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub token: Uuid,
    pub organizer_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Body of a successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: Uuid,
    pub organizer: Organizer,
}
