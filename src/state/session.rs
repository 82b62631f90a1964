//! Session management
//!
//! The session context is the one place the current token and user live.
//! Every write goes through this module: `SessionStore::{restore, login,
//! register, logout}` and `SessionContext::invalidate` (the API client's 401
//! path). Everything else only reads.

use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};
use crate::models::{RegisterRequest, User};
use crate::services::AuthService;
use crate::state::forms::RegistrationForm;
use crate::state::storage::{PersistedSession, StateStorage};
use crate::utils::errors::Result;
use crate::utils::logging;

/// Authenticated identity held by the client.
///
/// Token and user are either both present or both absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated { token: String, user: User },
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Authenticated { token, .. } => Some(token),
            Session::Anonymous => None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Authenticated { user, .. } => Some(user),
            Session::Anonymous => None,
        }
    }
}

/// Shared session state: in-memory session, persisted entries and the
/// default `Authorization` header the API client falls back on.
#[derive(Debug)]
pub struct SessionContext {
    storage: StateStorage,
    session: RwLock<Session>,
    auth_header: RwLock<Option<String>>,
}

impl SessionContext {
    pub fn new(storage: StateStorage) -> Arc<Self> {
        Arc::new(Self {
            storage,
            session: RwLock::new(Session::Anonymous),
            auth_header: RwLock::new(None),
        })
    }

    pub fn session(&self) -> Session {
        self.session.read().unwrap_or_else(|p| p.into_inner()).clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().unwrap_or_else(|p| p.into_inner()).is_authenticated()
    }

    /// The armed default header value (`Bearer <token>`), if any
    pub fn auth_header(&self) -> Option<String> {
        self.auth_header.read().unwrap_or_else(|p| p.into_inner()).clone()
    }

    /// Token to send with the next request: storage first, then the armed
    /// header. Nothing is sent while the session is anonymous, whatever
    /// storage still holds.
    pub fn bearer_token(&self) -> Option<String> {
        if !self.is_authenticated() {
            return None;
        }
        match self.storage.token() {
            Ok(Some(token)) if !token.is_empty() => return Some(token),
            Ok(_) => {}
            Err(e) => warn!(error = %e, "Could not read token from storage"),
        }
        self.auth_header()
            .and_then(|header| header.strip_prefix("Bearer ").map(str::to_string))
    }

    pub fn storage(&self) -> &StateStorage {
        &self.storage
    }

    /// Wipe the session after the backend rejected it
    pub fn invalidate(&self) {
        let username = self.session().user().map(|u| u.username.clone());
        warn!(username = ?username, "Session rejected by backend, clearing");
        self.clear();
        logging::log_session_change(username.as_deref(), "invalidated");
    }

    fn establish(&self, token: String, user: User) -> Result<()> {
        self.storage.save_session(&token, &user)?;
        self.arm_header(&token);
        *self.session.write().unwrap_or_else(|p| p.into_inner()) =
            Session::Authenticated { token, user };
        Ok(())
    }

    fn clear(&self) {
        *self.session.write().unwrap_or_else(|p| p.into_inner()) = Session::Anonymous;
        if let Err(e) = self.storage.clear_session() {
            warn!(error = %e, "Failed to clear persisted session");
        }
        self.disarm_header();
    }

    fn arm_header(&self, token: &str) {
        *self.auth_header.write().unwrap_or_else(|p| p.into_inner()) = Some(format!("Bearer {}", token));
    }

    fn disarm_header(&self) {
        *self.auth_header.write().unwrap_or_else(|p| p.into_inner()) = None;
    }
}

/// Session operations exposed to pages
#[derive(Clone, Debug)]
pub struct SessionStore {
    context: Arc<SessionContext>,
    auth: AuthService,
}

impl SessionStore {
    pub fn new(context: Arc<SessionContext>, auth: AuthService) -> Self {
        Self { context, auth }
    }

    pub fn context(&self) -> &Arc<SessionContext> {
        &self.context
    }

    pub fn session(&self) -> Session {
        self.context.session()
    }

    pub fn is_authenticated(&self) -> bool {
        self.context.is_authenticated()
    }

    pub fn user(&self) -> Option<User> {
        self.context.session().user().cloned()
    }

    pub fn token(&self) -> Option<String> {
        self.context.session().token().map(str::to_string)
    }

    /// Rehydrate from storage. Returns whether a session was restored.
    ///
    /// A half-present or unreadable pair is removed so storage never holds
    /// one entry without the other.
    pub fn restore(&self) -> Result<bool> {
        match self.context.storage.load_session() {
            Ok(PersistedSession::Complete { token, user }) => {
                debug!(username = %user.username, "Restoring persisted session");
                self.context.arm_header(&token);
                *self.context.session.write().unwrap_or_else(|p| p.into_inner()) =
                    Session::Authenticated { token, user };
                Ok(true)
            }
            Ok(PersistedSession::Empty) => {
                debug!("No persisted session");
                Ok(false)
            }
            Ok(PersistedSession::Partial) => {
                warn!("Persisted session is incomplete, clearing it");
                self.context.clear();
                Ok(false)
            }
            Err(e) => {
                warn!(error = %e, "Persisted session unreadable, clearing it");
                self.context.clear();
                Ok(false)
            }
        }
    }

    /// Authenticate with the backend.
    ///
    /// Login only tells us the username; email and full name stay blank.
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        let response = self.auth.login(username, password).await?;
        if let Some(returned) = &response.user {
            debug!(username = %returned.username, "Login response carried a user record, keeping the local one");
        }

        let user = User::from_username(username);
        self.context.establish(response.token, user.clone())?;

        info!(username = %username, "Logged in");
        logging::log_session_change(Some(username), "login");
        Ok(user)
    }

    /// Validate the form locally, then register with the backend
    pub async fn register(&self, form: &RegistrationForm) -> Result<User> {
        let request: RegisterRequest = form.validate()?;
        let response = self.auth.register(&request).await?;

        let user = User::from(&request);
        self.context.establish(response.token, user.clone())?;

        info!(username = %user.username, "Registered");
        logging::log_session_change(Some(&user.username), "register");
        Ok(user)
    }

    /// Forget the session locally. No backend call.
    pub fn logout(&self) {
        let username = self.user().map(|u| u.username);
        self.context.clear();
        logging::log_session_change(username.as_deref(), "logout");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::storage::{StorageBackend, TOKEN_KEY, USER_KEY};
    use crate::utils::errors::ClubError;

    #[test]
    fn test_bearer_token_prefers_storage() {
        let context = SessionContext::new(StateStorage::in_memory());
        assert!(context.bearer_token().is_none());

        context
            .establish("abc123".to_string(), User::from_username("admin"))
            .unwrap();
        context.storage().backend().set(TOKEN_KEY, "stored").unwrap();
        assert_eq!(context.bearer_token().as_deref(), Some("stored"));

        context.storage().backend().remove(TOKEN_KEY).unwrap();
        assert_eq!(context.bearer_token().as_deref(), Some("abc123"));
    }

    #[test]
    fn test_anonymous_session_ignores_stored_token() {
        let context = SessionContext::new(StateStorage::in_memory());
        context.storage().backend().set(TOKEN_KEY, "leftover").unwrap();
        context.arm_header("leftover");

        assert!(context.bearer_token().is_none());
    }

    /// Backend whose removals always fail
    #[derive(Debug, Default)]
    struct StickyBackend {
        entries: std::sync::Mutex<std::collections::HashMap<String, String>>,
    }

    impl StorageBackend for StickyBackend {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.entries.lock().unwrap().insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Err(ClubError::Storage("read-only".to_string()))
        }
    }

    #[test]
    fn test_invalidate_with_undeletable_storage_stops_sending_token() {
        let storage = StateStorage::new(Arc::new(StickyBackend::default()));
        let context = SessionContext::new(storage.clone());
        context
            .establish("abc123".to_string(), User::from_username("admin"))
            .unwrap();

        context.invalidate();

        assert!(!context.is_authenticated());
        assert!(context.bearer_token().is_none());
        assert_ne!(
            storage.load_session().unwrap(),
            PersistedSession::Complete { token: "abc123".to_string(), user: User::from_username("admin") }
        );

        // A fresh process over the same storage does not come back signed in
        let next = SessionContext::new(storage);
        let store = SessionStore::new(next.clone(), dummy_auth(next.clone()));
        assert!(!store.restore().unwrap());
        assert!(next.bearer_token().is_none());
    }

    fn dummy_auth(context: Arc<SessionContext>) -> AuthService {
        let api = crate::services::ApiClient::new(
            &crate::config::Settings::default(),
            context,
            crate::state::navigation::Navigator::default(),
        )
        .unwrap();
        AuthService::new(api)
    }

    #[test]
    fn test_restore_clears_token_without_user() {
        let context = SessionContext::new(StateStorage::in_memory());
        context.storage().backend().set(TOKEN_KEY, "abc123").unwrap();
        let store = SessionStore::new(context.clone(), dummy_auth(context.clone()));

        assert!(!store.restore().unwrap());

        assert!(context.storage().backend().get(TOKEN_KEY).unwrap().is_none());
        assert!(context.storage().backend().get(USER_KEY).unwrap().is_none());
        assert!(context.auth_header().is_none());
        assert_eq!(store.session(), Session::Anonymous);
    }

    #[test]
    fn test_restore_clears_unparsable_user() {
        let context = SessionContext::new(StateStorage::in_memory());
        context.storage().backend().set(TOKEN_KEY, "abc123").unwrap();
        context.storage().backend().set(USER_KEY, "{not json").unwrap();
        let store = SessionStore::new(context.clone(), dummy_auth(context.clone()));

        assert!(!store.restore().unwrap());

        assert!(context.storage().backend().get(TOKEN_KEY).unwrap().is_none());
        assert!(context.storage().backend().get(USER_KEY).unwrap().is_none());
        assert!(context.auth_header().is_none());
    }

    #[test]
    fn test_invalidate_clears_everything() {
        let context = SessionContext::new(StateStorage::in_memory());
        context
            .establish("abc123".to_string(), User::from_username("admin"))
            .unwrap();
        assert!(context.is_authenticated());
        assert_eq!(context.auth_header().as_deref(), Some("Bearer abc123"));

        context.invalidate();
        assert_eq!(context.session(), Session::Anonymous);
        assert!(context.auth_header().is_none());
        assert!(context.storage().backend().get(TOKEN_KEY).unwrap().is_none());
        assert!(context.storage().backend().get(USER_KEY).unwrap().is_none());
    }
}
