//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the client.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Generate a new request id
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Ensure an API base URL ends with `/api`
pub fn normalize_api_base(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.ends_with("/api") {
        trimmed.to_string()
    } else if trimmed.ends_with('/') {
        format!("{}api", trimmed)
    } else {
        format!("{}/api", trimmed)
    }
}

/// Parse an event date.
///
/// Accepts a plain `YYYY-MM-DD` date (midnight UTC), an RFC 3339 timestamp, or
/// a naive `YYYY-MM-DDTHH:MM[:SS[.fff]]` timestamp read as UTC.
pub fn parse_event_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Format an event date for display, leaving unparsable input untouched
pub fn format_event_date(value: &str) -> String {
    match parse_event_date(value) {
        Some(ts) => ts.format("%B %-d, %Y").to_string(),
        None => value.to_string(),
    }
}

/// Initials from the first two words of a name
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// Truncate text to a maximum length with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Treat whitespace-only optional text as absent
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
