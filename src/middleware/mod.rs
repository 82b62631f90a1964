//! Middleware module
//!
//! This module contains request logging, the route table and the route guard

pub mod auth;
pub mod logging;
pub mod routes;

pub use auth::{GuardDecision, RouteGuard, Router};
pub use logging::RequestLogger;
pub use routes::{Resolution, Route, RouteTable};
