use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    /// Immutable after creation; the organizer's authority over the event's
    /// requests derives from this field.
    pub organizer_id: Uuid,
    pub name: String,
    pub date: DateTime<Utc>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /events`. The date arrives as text from the form and is
/// parsed here so an unparsable value surfaces as a validation error
/// rather than a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreateEventPayload {
    pub name: String,
    pub date: String,
    pub description: Option<String>,
}

impl CreateEventPayload {
    pub fn validate(&self) -> Result<ValidatedEvent, AppError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Event name is required".to_string()));
        }

        let date = DateTime::parse_from_rfc3339(self.date.trim())
            .map(|d| d.with_timezone(&Utc))
            .map_err(|_| {
                AppError::Validation(format!(
                    "'{}' is not a valid RFC 3339 timestamp",
                    self.date
                ))
            })?;

        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok(ValidatedEvent {
            name: name.to_string(),
            date,
            description,
        })
    }
}

/// A creation payload that passed validation, ready for insertion.
#[derive(Debug)]
pub struct ValidatedEvent {
    pub name: String,
    pub date: DateTime<Utc>,
    pub description: Option<String>,
}

/// Which slice of the directory to list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventScope {
    /// Every event, for the public attendee view.
    #[default]
    All,
    /// Only events owned by the authenticated organizer.
    Mine,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListEventsQuery {
    #[serde(default)]
    pub scope: EventScope,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, date: &str, description: Option<&str>) -> CreateEventPayload {
        CreateEventPayload {
            name: name.to_string(),
            date: date.to_string(),
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn test_valid_event() {
        let p = payload("Warehouse Night", "2026-09-12T22:00:00Z", Some("Open decks"));
        let v = p.validate().unwrap();
        assert_eq!(v.name, "Warehouse Night");
        assert_eq!(v.description.as_deref(), Some("Open decks"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let p = payload("   ", "2026-09-12T22:00:00Z", None);
        assert!(matches!(p.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_unparsable_date_rejected() {
        let p = payload("Warehouse Night", "next saturday", None);
        let err = p.validate().unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("RFC 3339")));
    }

    #[test]
    fn test_offset_timestamp_normalized_to_utc() {
        let p = payload("Warehouse Night", "2026-09-12T22:00:00+02:00", None);
        let v = p.validate().unwrap();
        assert_eq!(v.date.to_rfc3339(), "2026-09-12T20:00:00+00:00");
    }

    #[test]
    fn test_blank_description_becomes_none() {
        let p = payload("Warehouse Night", "2026-09-12T22:00:00Z", Some("  "));
        let v = p.validate().unwrap();
        assert!(v.description.is_none());
    }

    #[test]
    fn test_scope_defaults_to_all() {
        let q: ListEventsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.scope, EventScope::All);
    }
}
