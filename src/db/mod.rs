use sqlx::postgres::PgPoolOptions;

pub mod events;
pub mod organizers;
pub mod requests;
pub mod sessions;

pub use events::EventRepo;
pub use organizers::OrganizerRepo;
pub use requests::RequestRepo;
pub use sessions::SessionRepo;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}

/// True when the error is a Postgres unique-constraint violation, used to
/// translate duplicate inserts into domain errors.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
    )
}
