//! Upcoming/past event partition

use chrono::{DateTime, Utc};
use crate::models::Event;

/// Events split around a point in time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPartition {
    /// Soonest first
    pub upcoming: Vec<Event>,
    /// Most recent first; includes events whose date does not parse
    pub past: Vec<Event>,
}

/// Split events by comparing their date to `now`. Every event lands in
/// exactly one side.
pub fn partition_events(events: &[Event], now: DateTime<Utc>) -> EventPartition {
    let (mut upcoming, mut past): (Vec<Event>, Vec<Event>) =
        events.iter().cloned().partition(|event| event.is_upcoming(now));

    upcoming.sort_by_key(|event| event.starts_at());
    past.sort_by(|a, b| b.starts_at().cmp(&a.starts_at()));

    EventPartition { upcoming, past }
}

/// The next `limit` upcoming events
pub fn next_events(events: &[Event], now: DateTime<Utc>, limit: usize) -> Vec<Event> {
    let mut upcoming = partition_events(events, now).upcoming;
    upcoming.truncate(limit);
    upcoming
}
