//! Error handling for AaryaClub
//!
//! This module defines the main error type used throughout the client core
//! and the taxonomy pages use to decide how an error is surfaced.

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for AaryaClub
#[derive(Error, Debug)]
pub enum ClubError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Session rejected by the server")]
    Unauthorized,

    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: i64 },
}

/// Result type alias for AaryaClub operations
pub type Result<T> = std::result::Result<T, ClubError>;

/// How an error reaches the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caught locally before any network call
    Validation,
    /// 401 from the backend, handled globally by the API client
    Authentication,
    /// Any other failed request, surfaced to the calling page
    Request,
    /// Local faults: storage, configuration, programming errors
    Internal,
}

impl ClubError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClubError::Validation(_) => ErrorKind::Validation,
            ClubError::Unauthorized => ErrorKind::Authentication,
            ClubError::Api { .. }
            | ClubError::Http(_)
            | ClubError::InvalidResponse(_)
            | ClubError::NotFound { .. } => ErrorKind::Request,
            ClubError::Serialization(_)
            | ClubError::Io(_)
            | ClubError::UrlParse(_)
            | ClubError::Config(_)
            | ClubError::Storage(_)
            | ClubError::InvalidStateTransition { .. } => ErrorKind::Internal,
        }
    }

    /// Backend-provided message, if the server sent one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClubError::Api { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    /// Text for an inline notice, falling back when the server said nothing useful
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClubError::Validation(msg) => msg.clone(),
            other => other
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        }
    }

    /// Check if the error came from the backend rejecting the session
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClubError::Unauthorized)
    }
}

impl From<config::ConfigError> for ClubError {
    fn from(err: config::ConfigError) -> Self {
        ClubError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(ClubError::Validation("x".into()).kind(), ErrorKind::Validation);
        assert_eq!(ClubError::Unauthorized.kind(), ErrorKind::Authentication);
        let api = ClubError::Api { status: StatusCode::BAD_REQUEST, message: "nope".into() };
        assert_eq!(api.kind(), ErrorKind::Request);
        assert_eq!(ClubError::Storage("disk".into()).kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_user_message_prefers_server_text() {
        let api = ClubError::Api {
            status: StatusCode::BAD_REQUEST,
            message: "Invalid username or password".into(),
        };
        assert_eq!(api.user_message("Login failed"), "Invalid username or password");

        let empty = ClubError::Api { status: StatusCode::INTERNAL_SERVER_ERROR, message: String::new() };
        assert_eq!(empty.user_message("Operation failed"), "Operation failed");

        let validation = ClubError::Validation("Passwords do not match".into());
        assert_eq!(validation.user_message("ignored"), "Passwords do not match");
    }
}
