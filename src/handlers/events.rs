use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use uuid::Uuid;

use crate::auth::Identity;
use crate::db::EventRepo;
use crate::models::event::{CreateEventPayload, EventScope, ListEventsQuery};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::response::{created, success};

/// GET /events?scope=all|mine
///
/// Ordered by event date ascending. `scope=mine` requires a logged-in
/// organizer and narrows the listing to their own events.
pub async fn list_events(
    identity: Option<Identity>,
    State(state): State<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> AppResult<Response> {
    let events = match query.scope {
        EventScope::All => EventRepo::list_all(&state.pool).await?,
        EventScope::Mine => {
            let identity = identity.ok_or_else(|| {
                AppError::Auth("Log in to list your own events".to_string())
            })?;
            EventRepo::list_for_organizer(&state.pool, identity.organizer_id).await?
        }
    };

    Ok(success(events, "Events fetched"))
}

/// GET /events/:id
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> AppResult<Response> {
    let event = EventRepo::find_by_id(&state.pool, event_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event '{event_id}' was not found")))?;

    Ok(success(event, "Event fetched"))
}

/// POST /events
///
/// Organizer-only. The new event is owned by the caller for its whole
/// lifetime; ownership never changes hands.
pub async fn create_event(
    identity: Identity,
    State(state): State<AppState>,
    Json(payload): Json<CreateEventPayload>,
) -> AppResult<Response> {
    let validated = payload.validate()?;

    let event = EventRepo::create(&state.pool, identity.organizer_id, &validated).await?;

    tracing::info!(event_id = %event.id, organizer_id = %identity.organizer_id, "event created");
    Ok(created(event, "Event created successfully"))
}
