use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::error::AppError;

/// Workflow state of a song request.
///
/// The only legal transitions are `pending -> playing`,
/// `pending -> rejected` and `playing -> completed`. `completed` and
/// `rejected` are terminal; there is no un-reject or un-complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Playing,
    Completed,
    Rejected,
}

impl RequestStatus {
    pub fn can_transition_to(self, target: RequestStatus) -> bool {
        use RequestStatus::*;
        matches!(
            (self, target),
            (Pending, Playing) | (Pending, Rejected) | (Playing, Completed)
        )
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Playing => "playing",
            RequestStatus::Completed => "completed",
            RequestStatus::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SongRequest {
    pub id: Uuid,
    pub event_id: Uuid,
    pub song_name: String,
    pub artist: String,
    pub special_request: Option<String>,
    pub tip_amount: Decimal,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /events/:id/requests`. Submitted by attendees without
/// authentication; the status is fixed at `pending` server-side.
#[derive(Debug, Deserialize)]
pub struct SubmitRequestPayload {
    pub song_name: String,
    pub artist: String,
    pub special_request: Option<String>,
    #[serde(default, deserialize_with = "deserialize_tip")]
    pub tip_amount: Decimal,
}

impl SubmitRequestPayload {
    pub fn validate(&self) -> Result<ValidatedRequest, AppError> {
        let song_name = self.song_name.trim();
        if song_name.is_empty() {
            return Err(AppError::Validation("Song name is required".to_string()));
        }
        let artist = self.artist.trim();
        if artist.is_empty() {
            return Err(AppError::Validation("Artist is required".to_string()));
        }
        if self.tip_amount.is_sign_negative() {
            return Err(AppError::Validation(
                "Tip amount cannot be negative".to_string(),
            ));
        }

        let special_request = self
            .special_request
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(ValidatedRequest {
            song_name: song_name.to_string(),
            artist: artist.to_string(),
            special_request,
            tip_amount: self.tip_amount,
        })
    }
}

/// A submission that passed validation, ready for insertion.
#[derive(Debug)]
pub struct ValidatedRequest {
    pub song_name: String,
    pub artist: String,
    pub special_request: Option<String>,
    pub tip_amount: Decimal,
}

/// Body of `POST /requests/:id/status`.
#[derive(Debug, Deserialize)]
pub struct TransitionPayload {
    pub status: RequestStatus,
}

/// Tips come out of a free-form input, so the field may be a JSON number,
/// a numeric string, junk text, or missing entirely. Anything that does
/// not parse as a decimal is coerced to zero rather than rejected.
fn deserialize_tip<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(coerce_tip(value))
}

fn coerce_tip(value: Option<Value>) -> Decimal {
    match value {
        Some(Value::Number(n)) => n.to_string().parse().unwrap_or(Decimal::ZERO),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ALL_STATUSES: [RequestStatus; 4] = [
        RequestStatus::Pending,
        RequestStatus::Playing,
        RequestStatus::Completed,
        RequestStatus::Rejected,
    ];

    #[test]
    fn test_transition_matrix() {
        let allowed = [
            (RequestStatus::Pending, RequestStatus::Playing),
            (RequestStatus::Pending, RequestStatus::Rejected),
            (RequestStatus::Playing, RequestStatus::Completed),
        ];

        for from in ALL_STATUSES {
            for to in ALL_STATUSES {
                let expected = allowed.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(to),
                    expected,
                    "{from} -> {to} should be {}",
                    if expected { "allowed" } else { "denied" }
                );
            }
        }
    }

    #[test]
    fn test_no_skipping_straight_to_completed() {
        assert!(!RequestStatus::Pending.can_transition_to(RequestStatus::Completed));
    }

    #[test]
    fn test_rejected_is_terminal() {
        for to in ALL_STATUSES {
            assert!(!RequestStatus::Rejected.can_transition_to(to));
        }
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(RequestStatus::Playing).unwrap(),
            json!("playing")
        );
    }

    fn submit(value: Value) -> SubmitRequestPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_tip_accepts_number() {
        let p = submit(json!({"song_name": "One More Time", "artist": "Daft Punk", "tip_amount": 5.5}));
        assert_eq!(p.tip_amount, "5.5".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_tip_accepts_numeric_string() {
        let p = submit(json!({"song_name": "One More Time", "artist": "Daft Punk", "tip_amount": "10.25"}));
        assert_eq!(p.tip_amount, "10.25".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_unparsable_tip_coerces_to_zero() {
        let p = submit(json!({"song_name": "One More Time", "artist": "Daft Punk", "tip_amount": "abc"}));
        assert_eq!(p.tip_amount, Decimal::ZERO);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_absent_tip_defaults_to_zero() {
        let p = submit(json!({"song_name": "One More Time", "artist": "Daft Punk"}));
        assert_eq!(p.tip_amount, Decimal::ZERO);
    }

    #[test]
    fn test_null_tip_defaults_to_zero() {
        let p = submit(json!({"song_name": "One More Time", "artist": "Daft Punk", "tip_amount": null}));
        assert_eq!(p.tip_amount, Decimal::ZERO);
    }

    #[test]
    fn test_negative_tip_rejected() {
        let p = submit(json!({"song_name": "One More Time", "artist": "Daft Punk", "tip_amount": "-3"}));
        assert!(matches!(p.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_zero_tip_is_fine() {
        let p = submit(json!({"song_name": "One More Time", "artist": "Daft Punk", "tip_amount": 0}));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_empty_song_name_rejected() {
        let p = submit(json!({"song_name": "  ", "artist": "Daft Punk"}));
        assert!(matches!(p.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_empty_artist_rejected() {
        let p = submit(json!({"song_name": "One More Time", "artist": ""}));
        assert!(matches!(p.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_blank_special_request_becomes_none() {
        let p = submit(json!({
            "song_name": "One More Time",
            "artist": "Daft Punk",
            "special_request": "   "
        }));
        assert!(p.validate().unwrap().special_request.is_none());
    }
}
