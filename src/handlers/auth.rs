use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::Identity;
use crate::db::{is_unique_violation, OrganizerRepo, SessionRepo};
use crate::models::organizer::{LoginPayload, RegisterPayload};
use crate::models::session::LoginResponse;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::response::{created, empty_success, success};

/// POST /auth/register
///
/// Create an organizer account. Does not log the new organizer in; the
/// client follows up with a login call.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> AppResult<Response> {
    payload.validate()?;

    let password_hash = hash_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("Could not hash password: {e}")))?;

    let email = payload.email.trim().to_lowercase();
    let organizer = OrganizerRepo::create(&state.pool, &email, &password_hash)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Auth("An account with this email already exists".to_string())
            } else {
                AppError::Database(e)
            }
        })?;

    tracing::info!(organizer_id = %organizer.id, "organizer registered");
    Ok(created(organizer, "Registration successful"))
}

/// POST /auth/login
///
/// Exchange credentials for an opaque session token. Unknown email and
/// wrong password produce the same message on purpose.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> AppResult<Response> {
    let invalid = || AppError::Auth("Invalid email or password".to_string());

    let email = payload.email.trim().to_lowercase();
    let organizer = OrganizerRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid)?;

    let verified = verify_password(&payload.password, &organizer.password_hash)
        .map_err(|e| AppError::Internal(format!("Could not verify password: {e}")))?;
    if !verified {
        return Err(invalid());
    }

    let session = SessionRepo::create(&state.pool, organizer.id).await?;

    tracing::info!(organizer_id = %organizer.id, "organizer logged in");
    Ok(success(
        LoginResponse {
            token: session.token,
            organizer,
        },
        "Successfully logged in",
    ))
}

/// POST /auth/logout
///
/// Revoke the session that authenticated this call.
pub async fn logout(identity: Identity, State(state): State<AppState>) -> AppResult<Response> {
    SessionRepo::delete(&state.pool, identity.token).await?;

    tracing::info!(organizer_id = %identity.organizer_id, "organizer logged out");
    Ok(empty_success("Logged out successfully"))
}

#[derive(Serialize)]
struct IdentityPayload {
    organizer_id: Uuid,
    email: String,
}

/// GET /auth/me
pub async fn me(identity: Identity) -> AppResult<Response> {
    Ok(success(
        IdentityPayload {
            organizer_id: identity.organizer_id,
            email: identity.email,
        },
        "Current identity",
    ))
}
