//! Route table
//!
//! Public pages, the login and registration entry points, and the admin
//! subtree. `/admin` and unknown paths are redirects.

use std::fmt;
use crate::config::RoutesConfig;

/// A page that can render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    About,
    Contact,
    PublicEvents,
    PublicMembers,
    AdminLogin,
    Register,
    AdminDashboard,
    AdminEvents,
    AdminMembers,
}

impl Route {
    /// Whether the route sits behind the session guard
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::AdminDashboard | Route::AdminEvents | Route::AdminMembers)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::About => "About",
            Route::Contact => "Contact",
            Route::PublicEvents => "Events",
            Route::PublicMembers => "Members",
            Route::AdminLogin => "Admin Login",
            Route::Register => "Register",
            Route::AdminDashboard => "Dashboard",
            Route::AdminEvents => "Events Management",
            Route::AdminMembers => "Members Management",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Result of matching a path against the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    /// Redirect, replacing the current history entry
    Redirect(String),
}

/// Path-to-route mapping
#[derive(Debug, Clone)]
pub struct RouteTable {
    login_path: String,
    home_path: String,
}

impl RouteTable {
    pub fn new(config: &RoutesConfig) -> Self {
        Self {
            login_path: normalize_path(&config.login_path),
            home_path: normalize_path(&config.home_path),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Landing page after login when no destination was recorded
    pub fn home_path(&self) -> &str {
        &self.home_path
    }

    pub fn resolve(&self, path: &str) -> Resolution {
        let path = normalize_path(path);
        if path == self.login_path {
            return Resolution::Render(Route::AdminLogin);
        }

        match path.as_str() {
            "/" => Resolution::Render(Route::Home),
            "/about" => Resolution::Render(Route::About),
            "/contact" => Resolution::Render(Route::Contact),
            "/events" => Resolution::Render(Route::PublicEvents),
            "/members" => Resolution::Render(Route::PublicMembers),
            "/register" => Resolution::Render(Route::Register),
            "/admin" => Resolution::Redirect("/admin/dashboard".to_string()),
            "/admin/dashboard" => Resolution::Render(Route::AdminDashboard),
            "/admin/events" => Resolution::Render(Route::AdminEvents),
            "/admin/members" => Resolution::Render(Route::AdminMembers),
            _ => Resolution::Redirect("/".to_string()),
        }
    }
}

/// Drop query, fragment and trailing slash; keep a leading slash
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or("").trim();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
