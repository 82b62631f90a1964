//! Logging configuration and setup
//!
//! This module provides logging initialization and the structured logging
//! helpers used by the session and CRUD layers.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use crate::config::LoggingConfig;
use crate::utils::errors::{ClubError, Result};

/// Initialize logging based on configuration.
///
/// The returned guard must be held for as long as the file writer should flush.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| ClubError::Config(format!("Invalid log filter '{}': {}", config.level, e)))?;

    let stdout_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let guard = match &config.directory {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::daily(directory, "aarya-club.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let json_layer = config.json.then(|| {
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking.clone())
            });
            let text_layer = (!config.json).then(|| {
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking)
            });
            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .with(json_layer)
                .with(text_layer)
                .try_init()
                .map_err(|e| ClubError::Config(e.to_string()))?;
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .try_init()
                .map_err(|e| ClubError::Config(e.to_string()))?;
            None
        }
    };

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log session lifecycle changes
pub fn log_session_change(username: Option<&str>, action: &str) {
    info!(username = username, action = action, "Session changed");
}

/// Log a successful collection mutation
pub fn log_record_action(resource: &str, action: &str, id: Option<i64>) {
    info!(resource = resource, action = action, id = id, "Record action performed");
}

/// Log navigation decisions taken by the guard or the 401 interceptor
pub fn log_redirect(from: &str, to: &str, reason: &str) {
    debug!(from = from, to = to, reason = reason, "Redirecting");
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &ClubError, context: Option<&str>) {
    if error.is_unauthorized() {
        warn!(api = api, context = context, "API rejected the session");
    } else {
        error!(api = api, error = %error, context = context, "API error occurred");
    }
}
