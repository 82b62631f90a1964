//! Event model

use std::fmt;
use serde::{Deserialize, Deserializer, Serialize};
use chrono::{DateTime, Utc};
use crate::utils::helpers::parse_event_date;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub date: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_form_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_gallery_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<EventCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_participants: Option<i32>,
}

impl Event {
    /// Parsed event date; `None` when the backend sent something unreadable
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        parse_event_date(&self.date)
    }

    /// Whether the event lies strictly after `now`
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.starts_at().map_or(false, |ts| ts > now)
    }

    /// Seats left, when the event has a cap
    pub fn spots_left(&self) -> Option<i32> {
        self.max_participants
            .map(|max| (max - self.current_participants.unwrap_or(0)).max(0))
    }
}

/// Event category.
///
/// Reading goes through [`EventCategory::parse`], so case does not matter and
/// unknown strings are kept as `Unknown` instead of failing the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Cultural,
    Sports,
    Academic,
    Social,
    Other,
    #[serde(untagged)]
    Unknown(String),
}

impl EventCategory {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "cultural" => EventCategory::Cultural,
            "sports" => EventCategory::Sports,
            "academic" => EventCategory::Academic,
            "social" => EventCategory::Social,
            "other" => EventCategory::Other,
            _ => EventCategory::Unknown(value.trim().to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for EventCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(EventCategory::parse(&raw))
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventCategory::Cultural => write!(f, "cultural"),
            EventCategory::Sports => write!(f, "sports"),
            EventCategory::Academic => write!(f, "academic"),
            EventCategory::Social => write!(f, "social"),
            EventCategory::Other => write!(f, "other"),
            EventCategory::Unknown(raw) => write!(f, "{}", raw),
        }
    }
}

/// Payload for creating or updating an event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    pub date: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_form_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_gallery_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<EventCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<i32>,
}

impl From<&Event> for CreateEventRequest {
    fn from(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            date: event.date.clone(),
            description: event.description.clone(),
            image_url: event.image_url.clone(),
            registration_form_url: event.registration_form_url.clone(),
            photo_gallery_url: event.photo_gallery_url.clone(),
            category: event.category.clone(),
            location: event.location.clone(),
            max_participants: event.max_participants,
        }
    }
}
