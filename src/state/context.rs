//! Application context
//!
//! This module wires the session context, navigation, services and router
//! together. Everything shares one `SessionContext` and one `Navigator`.

use std::sync::Arc;
use crate::config::Settings;
use crate::middleware::{RouteTable, Router};
use crate::services::{EventService, MemberService, ServiceFactory};
use crate::state::controller::CrudController;
use crate::state::navigation::Navigator;
use crate::state::session::{SessionContext, SessionStore};
use crate::state::storage::StateStorage;
use crate::utils::errors::Result;

pub type EventsPage = CrudController<EventService>;
pub type MembersPage = CrudController<MemberService>;

/// Application-wide context containing services and settings
#[derive(Debug, Clone)]
pub struct AppContext {
    pub settings: Settings,
    pub session: Arc<SessionContext>,
    pub navigator: Navigator,
    pub services: Arc<ServiceFactory>,
    pub session_store: SessionStore,
    pub router: Router,
}

impl AppContext {
    /// Build the context over the given storage, starting at `/`
    pub fn new(settings: Settings, storage: StateStorage) -> Result<Self> {
        let session = SessionContext::new(storage);
        let navigator = Navigator::new("/");
        let services = Arc::new(ServiceFactory::new(&settings, session.clone(), navigator.clone())?);
        let session_store = SessionStore::new(session.clone(), services.auth_service.clone());
        let router = Router::new(RouteTable::new(&settings.routes), session.clone(), navigator.clone());

        Ok(Self {
            settings,
            session,
            navigator,
            services,
            session_store,
            router,
        })
    }

    /// Build with file storage at the configured session path
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let storage = StateStorage::from_config(&settings.storage);
        Self::new(settings, storage)
    }

    /// Build and rehydrate the persisted session before anything renders
    pub fn bootstrap(settings: Settings) -> Result<Self> {
        let context = Self::from_settings(settings)?;
        context.session_store.restore()?;
        Ok(context)
    }

    pub fn events_page(&self) -> EventsPage {
        CrudController::new(self.services.event_service.clone())
    }

    pub fn members_page(&self) -> MembersPage {
        CrudController::new(self.services.member_service.clone())
    }

    pub fn leadership_roles(&self) -> &[String] {
        &self.settings.members.leadership_roles
    }
}
