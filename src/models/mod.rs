//! Data models module
//!
//! This module contains the records exchanged with the club REST API

pub mod event;
pub mod member;
pub mod user;

// Re-export commonly used models
pub use event::{Event, EventCategory, CreateEventRequest};
pub use member::{Member, CreateMemberRequest};
pub use user::{User, LoginRequest, RegisterRequest, AuthResponse};
