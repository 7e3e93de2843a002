use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use uuid::Uuid;

use crate::auth::Identity;
use crate::db::{EventRepo, RequestRepo};
use crate::models::request::{SubmitRequestPayload, TransitionPayload};
use crate::models::stats::compute_stats;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::response::{created, success};

/// POST /events/:id/requests
///
/// Open to anyone; attendees are not authenticated. A request pointing
/// at a nonexistent event is a validation failure, not a 404, because
/// the event id came out of the submission form.
pub async fn submit_request(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<SubmitRequestPayload>,
) -> AppResult<Response> {
    let validated = payload.validate()?;

    if EventRepo::find_by_id(&state.pool, event_id).await?.is_none() {
        return Err(AppError::Validation(format!(
            "Event '{event_id}' does not exist"
        )));
    }

    let request = RequestRepo::create(&state.pool, event_id, &validated).await?;

    tracing::info!(request_id = %request.id, event_id = %event_id, "request submitted");
    Ok(created(request, "Request submitted successfully"))
}

/// GET /events/:id/requests
///
/// Newest submissions first.
pub async fn list_requests(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> AppResult<Response> {
    ensure_event_exists(&state, event_id).await?;

    let requests = RequestRepo::list_for_event(&state.pool, event_id).await?;
    Ok(success(requests, "Requests fetched"))
}

/// GET /events/:id/stats
pub async fn event_stats(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> AppResult<Response> {
    ensure_event_exists(&state, event_id).await?;

    let requests = RequestRepo::list_for_event(&state.pool, event_id).await?;
    Ok(success(compute_stats(&requests), "Stats computed"))
}

/// POST /requests/:id/status
///
/// Only the organizer of the owning event may move a request through
/// the workflow, and only along a legal edge.
pub async fn transition(
    identity: Identity,
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
    Json(payload): Json<TransitionPayload>,
) -> AppResult<Response> {
    let request = RequestRepo::find_by_id(&state.pool, request_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Request '{request_id}' was not found")))?;

    let owner = RequestRepo::organizer_for_request(&state.pool, request_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Request '{request_id}' was not found")))?;
    if owner != identity.organizer_id {
        return Err(AppError::Auth(
            "Only the organizer of this event can update its requests".to_string(),
        ));
    }

    if !request.status.can_transition_to(payload.status) {
        return Err(AppError::InvalidTransition {
            from: request.status,
            to: payload.status,
        });
    }

    let updated = RequestRepo::set_status(&state.pool, request_id, payload.status).await?;

    tracing::info!(
        request_id = %request_id,
        from = %request.status,
        to = %updated.status,
        "request status updated"
    );
    Ok(success(updated, "Request status updated"))
}

async fn ensure_event_exists(state: &AppState, event_id: Uuid) -> AppResult<()> {
    if EventRepo::find_by_id(&state.pool, event_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Event '{event_id}' was not found"
        )));
    }
    Ok(())
}
