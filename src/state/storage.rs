//! Session storage implementation
//!
//! This module handles persistence of the session entries (`token` and
//! `user`) in client-local storage: a JSON file for the console, or memory.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn, error};
use crate::config::StorageConfig;
use crate::models::User;
use crate::utils::errors::{ClubError, Result};

/// Storage key holding the bearer token
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the serialized user record
pub const USER_KEY: &str = "user";

/// A flat string key/value store, the shape of browser local storage
pub trait StorageBackend: Send + Sync + fmt::Debug {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory backend
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| ClubError::Storage("memory storage lock poisoned".to_string()))
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// JSON-file backend. The whole map is re-read on every access so a second
/// process sharing the file observes logouts.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(data) if data.trim().is_empty() => Ok(HashMap::new()),
            Ok(data) => serde_json::from_str(&data).map_err(|e| {
                ClubError::Storage(format!("corrupt session file {}: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, entries: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, serialized)?;
        Ok(())
    }

    fn update<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut HashMap<String, String>),
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| ClubError::Storage("file storage lock poisoned".to_string()))?;
        // A corrupt file is replaced rather than blocking every write
        let mut entries = self.read_all().unwrap_or_else(|e| {
            warn!(error = %e, "Discarding unreadable session file");
            HashMap::new()
        });
        apply(&mut entries);
        self.write_all(&entries)
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

/// What storage held for the session at a given moment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistedSession {
    Empty,
    Complete { token: String, user: User },
    /// Only one entry present, or the user entry does not parse
    Partial,
}

/// Typed access to the two session entries
#[derive(Clone, Debug)]
pub struct StateStorage {
    backend: Arc<dyn StorageBackend>,
}

impl StateStorage {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// File-backed storage at the configured path
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(Arc::new(FileBackend::new(&config.session_path)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Raw token entry
    pub fn token(&self) -> Result<Option<String>> {
        self.backend.get(TOKEN_KEY)
    }

    /// Read both entries
    pub fn load_session(&self) -> Result<PersistedSession> {
        let token = self.backend.get(TOKEN_KEY)?;
        let user = self.backend.get(USER_KEY)?;

        match (token, user) {
            (None, None) => Ok(PersistedSession::Empty),
            (Some(token), Some(raw_user)) => match serde_json::from_str::<User>(&raw_user) {
                Ok(user) if !token.is_empty() => Ok(PersistedSession::Complete { token, user }),
                Ok(_) => Ok(PersistedSession::Partial),
                Err(e) => {
                    warn!(error = %e, "Stored user entry does not parse");
                    Ok(PersistedSession::Partial)
                }
            },
            _ => Ok(PersistedSession::Partial),
        }
    }

    /// Persist both entries
    pub fn save_session(&self, token: &str, user: &User) -> Result<()> {
        let serialized = serde_json::to_string(user)?;
        self.backend.set(TOKEN_KEY, token)?;
        if let Err(e) = self.backend.set(USER_KEY, &serialized) {
            error!(error = %e, "Failed to persist user entry, rolling back token");
            let _ = self.backend.remove(TOKEN_KEY);
            return Err(e);
        }
        debug!(username = %user.username, "Session persisted");
        Ok(())
    }

    /// Remove both entries
    pub fn clear_session(&self) -> Result<()> {
        let token_result = self.backend.remove(TOKEN_KEY);
        let user_result = self.backend.remove(USER_KEY);
        if let Err(e) = token_result.and(user_result) {
            // A blank token reads back as a partial session, never a restorable one
            if self.backend.get(TOKEN_KEY).ok().flatten().is_some() {
                if let Err(blank_err) = self.backend.set(TOKEN_KEY, "") {
                    error!(error = %blank_err, "Failed to blank stale token entry");
                }
            }
            return Err(e);
        }
        debug!("Session entries cleared");
        Ok(())
    }

    /// Direct backend access for callers that need raw entries
    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }
}
