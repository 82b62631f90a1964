//! Aarya Club client core
//!
//! Session handling, route guarding and CRUD synchronization for the Aarya
//! Club admin front end, talking to the club's REST backend. The console
//! binary drives the same controllers a page would.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod state;
pub mod utils;
pub mod middleware;
pub mod views;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{ClubError, Result};

// Re-export main components for easy access
pub use services::ServiceFactory;
pub use state::{AppContext, SessionStore, StateStorage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
