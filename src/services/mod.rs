//! Services module
//!
//! This module contains the API client and the typed resource services

pub mod api;
pub mod auth;
pub mod events;
pub mod members;

// Re-export commonly used services
pub use api::ApiClient;
pub use auth::AuthService;
pub use events::EventService;
pub use members::MemberService;

use std::sync::Arc;
use crate::config::settings::Settings;
use crate::state::navigation::Navigator;
use crate::state::session::SessionContext;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone, Debug)]
pub struct ServiceFactory {
    pub api: ApiClient,
    pub auth_service: AuthService,
    pub event_service: EventService,
    pub member_service: MemberService,
}

impl ServiceFactory {
    /// Create all services over one shared API client
    pub fn new(settings: &Settings, session: Arc<SessionContext>, navigator: Navigator) -> Result<Self> {
        let api = ApiClient::new(settings, session, navigator)?;

        Ok(Self {
            auth_service: AuthService::new(api.clone()),
            event_service: EventService::new(api.clone()),
            member_service: MemberService::new(api.clone()),
            api,
        })
    }
}
