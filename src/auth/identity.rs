use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::db::SessionRepo;
use crate::state::AppState;
use crate::utils::error::AppError;

/// Authenticated organizer resolved from a `Bearer` session token.
///
/// Use as an extractor parameter in any handler that requires an
/// organizer identity; handlers that merely behave differently when a
/// caller is logged in take `Option<Identity>` instead.
#[derive(Debug, Clone)]
pub struct Identity {
    pub organizer_id: Uuid,
    pub email: String,
    /// The session token that authenticated this call, kept so logout
    /// can revoke exactly this session.
    pub token: Uuid,
}

#[async_trait]
impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Auth("Missing Authorization header".to_string()))?;

        let raw_token = header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Auth("Invalid Authorization format, expected: Bearer <token>".to_string())
        })?;

        let token: Uuid = raw_token
            .trim()
            .parse()
            .map_err(|_| AppError::Auth("Malformed session token".to_string()))?;

        let organizer = SessionRepo::find_organizer(&state.pool, token)
            .await?
            .ok_or_else(|| AppError::Auth("Session is not valid, please log in".to_string()))?;

        Ok(Identity {
            organizer_id: organizer.id,
            email: organizer.email,
            token,
        })
    }
}
