//! Authentication middleware
//!
//! This module provides the route guard protecting the admin pages and the
//! router that applies the route table and the guard to navigation.

use std::sync::Arc;
use tracing::{debug, warn};
use crate::state::navigation::Navigator;
use crate::state::session::SessionContext;
use crate::utils::logging::log_redirect;
use super::routes::{normalize_path, Resolution, Route, RouteTable};

/// Guard verdict for one render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Send to login, remembering where the user was going
    Redirect { to: String, from: String },
}

/// Session presence check for protected routes. Holds no state of its own.
#[derive(Clone, Debug)]
pub struct RouteGuard {
    session: Arc<SessionContext>,
    login_path: String,
}

impl RouteGuard {
    pub fn new(session: Arc<SessionContext>, login_path: &str) -> Self {
        Self {
            session,
            login_path: login_path.to_string(),
        }
    }

    /// Decide whether `requested` may render
    pub fn check(&self, requested: &str) -> GuardDecision {
        if self.session.is_authenticated() {
            debug!(path = requested, "Guard passed");
            GuardDecision::Allow
        } else {
            warn!(path = requested, "Unauthenticated access to protected route");
            GuardDecision::Redirect {
                to: self.login_path.clone(),
                from: requested.to_string(),
            }
        }
    }
}

/// Applies the route table and the guard to navigation
#[derive(Clone, Debug)]
pub struct Router {
    table: RouteTable,
    guard: RouteGuard,
    navigator: Navigator,
}

impl Router {
    pub fn new(table: RouteTable, session: Arc<SessionContext>, navigator: Navigator) -> Self {
        let guard = RouteGuard::new(session, table.login_path());
        Self {
            table,
            guard,
            navigator,
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Navigate to `path`, following redirects and the guard, and return
    /// the route that ends up rendering.
    pub fn visit(&self, path: &str) -> Route {
        self.route(path, false)
    }

    fn route(&self, path: &str, replace_current: bool) -> Route {
        let mut target = normalize_path(path);
        let mut replace = replace_current;

        // The table's redirects all land on renderable routes; the bound
        // only protects against a misconfigured table.
        for _ in 0..4 {
            match self.table.resolve(&target) {
                Resolution::Redirect(next) => {
                    log_redirect(&target, &next, "route table");
                    target = next;
                    replace = true;
                }
                Resolution::Render(route) if route.is_protected() => {
                    return match self.guard.check(&target) {
                        GuardDecision::Allow => {
                            self.navigator.navigate(&target, replace);
                            route
                        }
                        GuardDecision::Redirect { to, from } => {
                            log_redirect(&from, &to, "not authenticated");
                            self.navigator.navigate_with_from(&to, &from, true);
                            Route::AdminLogin
                        }
                    };
                }
                Resolution::Render(route) => {
                    self.navigator.navigate(&target, replace);
                    return route;
                }
            }
        }

        self.navigator.navigate("/", true);
        Route::Home
    }

    /// Where to go after a successful login: the recorded destination, else home
    pub fn login_destination(&self) -> String {
        self.navigator
            .current()
            .from
            .unwrap_or_else(|| self.table.home_path().to_string())
    }

    /// Leave the login page for the recorded destination
    pub fn complete_login(&self) -> Route {
        let destination = self.login_destination();
        self.route(&destination, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoutesConfig;
    use crate::state::storage::StateStorage;

    #[test]
    fn test_guard_redirect_records_destination() {
        let session = SessionContext::new(StateStorage::in_memory());
        let guard = RouteGuard::new(session, "/admin/login");
        assert_eq!(
            guard.check("/admin/events"),
            GuardDecision::Redirect {
                to: "/admin/login".to_string(),
                from: "/admin/events".to_string()
            }
        );
    }

    #[test]
    fn test_visit_follows_table_redirects() {
        let session = SessionContext::new(StateStorage::in_memory());
        let router = Router::new(RouteTable::new(&RoutesConfig::default()), session, Navigator::default());

        assert_eq!(router.visit("/about"), Route::About);
        assert_eq!(router.navigator().current_path(), "/about");

        assert_eq!(router.visit("/unknown"), Route::Home);
        assert_eq!(router.navigator().current_path(), "/");
    }

    #[test]
    fn test_anonymous_admin_visit_lands_on_login() {
        let session = SessionContext::new(StateStorage::in_memory());
        let router = Router::new(RouteTable::new(&RoutesConfig::default()), session, Navigator::default());

        assert_eq!(router.visit("/admin"), Route::AdminLogin);
        let current = router.navigator().current();
        assert_eq!(current.path, "/admin/login");
        assert_eq!(current.from.as_deref(), Some("/admin/dashboard"));
        assert_eq!(router.login_destination(), "/admin/dashboard");
    }
}
