//! Client-side navigation
//!
//! Holds the current location and history. The route guard and the API
//! client's 401 handling both move the user through this.

use std::sync::{Arc, RwLock};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A visited location, with the destination a redirect interrupted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub path: String,
    /// Path the user originally asked for before being sent to login
    pub from: Option<String>,
}

impl Location {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            from: None,
        }
    }
}

/// Oldest entries are dropped past this depth
pub const MAX_HISTORY: usize = 50;

#[derive(Debug)]
struct History {
    entries: Vec<Location>,
}

/// Shared navigation handle; clones observe the same history
#[derive(Debug, Clone)]
pub struct Navigator {
    history: Arc<RwLock<History>>,
}

impl Navigator {
    /// Start at the given path
    pub fn new(initial: &str) -> Self {
        Self {
            history: Arc::new(RwLock::new(History {
                entries: vec![Location::new(initial)],
            })),
        }
    }

    pub fn current(&self) -> Location {
        let history = self.history.read().unwrap_or_else(|p| p.into_inner());
        history
            .entries
            .last()
            .cloned()
            .unwrap_or_else(|| Location::new("/"))
    }

    pub fn current_path(&self) -> String {
        self.current().path
    }

    /// Go to `path`. With `replace` the current entry is overwritten.
    pub fn navigate(&self, path: &str, replace: bool) {
        self.push(Location::new(path), replace);
    }

    /// Go to `path`, recording where the user was headed
    pub fn navigate_with_from(&self, path: &str, from: &str, replace: bool) {
        self.push(
            Location {
                path: path.to_string(),
                from: Some(from.to_string()),
            },
            replace,
        );
    }

    /// Pop one entry; the first entry is never removed
    pub fn back(&self) -> Location {
        let mut history = self.history.write().unwrap_or_else(|p| p.into_inner());
        if history.entries.len() > 1 {
            history.entries.pop();
        }
        history
            .entries
            .last()
            .cloned()
            .unwrap_or_else(|| Location::new("/"))
    }

    pub fn depth(&self) -> usize {
        self.history.read().unwrap_or_else(|p| p.into_inner()).entries.len()
    }

    fn push(&self, location: Location, replace: bool) {
        debug!(path = %location.path, from = ?location.from, replace = replace, "Navigating");
        let mut history = self.history.write().unwrap_or_else(|p| p.into_inner());
        if replace || history.entries.last() == Some(&location) {
            history.entries.pop();
        }
        history.entries.push(location);

        let overflow = history.entries.len().saturating_sub(MAX_HISTORY);
        if overflow > 0 {
            history.entries.drain(..overflow);
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new("/")
    }
}
