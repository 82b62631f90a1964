//! Derived views
//!
//! Read-only groupings of the fetched collections. Nothing here is persisted.

pub mod dashboard;
pub mod events;
pub mod members;

pub use dashboard::{dashboard_stats, Dashboard, DashboardStats};
pub use events::{next_events, partition_events, EventPartition};
pub use members::{partition_members, MemberPartition};
