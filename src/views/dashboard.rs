//! Admin dashboard
//!
//! Loads events and members together and derives the summary figures.

use chrono::{DateTime, Utc};
use futures::future::try_join;
use tracing::{error, info};
use crate::models::{Event, Member};
use crate::services::{EventService, MemberService};
use super::events::next_events;

/// Number of upcoming events the dashboard lists
pub const DASHBOARD_UPCOMING_LIMIT: usize = 3;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub total_events: usize,
    pub active_members: usize,
    pub upcoming_count: usize,
    pub next_events: Vec<Event>,
}

/// Summary figures
pub fn dashboard_stats(events: &[Event], members: &[Member], now: DateTime<Utc>) -> DashboardStats {
    let next = next_events(events, now, DASHBOARD_UPCOMING_LIMIT);
    DashboardStats {
        total_events: events.len(),
        active_members: members.iter().filter(|m| m.active).count(),
        upcoming_count: next.len(),
        next_events: next,
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub events: Vec<Event>,
    pub members: Vec<Member>,
    pub stats: DashboardStats,
    pub loaded: bool,
}

impl Dashboard {
    /// Fetch both collections concurrently. If either fails the dashboard
    /// stays empty; the failure is logged, not returned.
    pub async fn load(events: &EventService, members: &MemberService, now: DateTime<Utc>) -> Self {
        match try_join(events.list(), members.list()).await {
            Ok((events, members)) => {
                let stats = dashboard_stats(&events, &members, now);
                info!(events = events.len(), members = members.len(), "Dashboard loaded");
                Self {
                    events,
                    members,
                    stats,
                    loaded: true,
                }
            }
            Err(e) => {
                error!(error = %e, "Error fetching dashboard data");
                Self::default()
            }
        }
    }
}
