//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{ClubError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_storage_config(&settings.storage)?;
    validate_routes_config(&settings.routes)?;
    validate_members_config(&settings.members)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate API configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    if config.base_url.trim().is_empty() {
        return Err(ClubError::Config(
            "API base URL is required".to_string()
        ));
    }

    url::Url::parse(config.base_url.trim())
        .map_err(|e| ClubError::Config(format!("Invalid API base URL '{}': {}", config.base_url, e)))?;

    Ok(())
}

/// Validate session storage configuration
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    if config.session_path.trim().is_empty() {
        return Err(ClubError::Config(
            "Session storage path is required".to_string()
        ));
    }

    Ok(())
}

/// Validate route configuration
fn validate_routes_config(config: &super::RoutesConfig) -> Result<()> {
    for (name, path) in [("login", &config.login_path), ("home", &config.home_path)] {
        if !path.starts_with('/') {
            return Err(ClubError::Config(
                format!("The {} path must start with '/': {}", name, path)
            ));
        }
    }

    if config.login_path == config.home_path {
        return Err(ClubError::Config(
            "Login and home paths must differ".to_string()
        ));
    }

    Ok(())
}

/// Validate member view configuration
fn validate_members_config(config: &super::MembersConfig) -> Result<()> {
    if config.leadership_roles.iter().all(|role| role.trim().is_empty()) {
        return Err(ClubError::Config(
            "At least one leadership role is required".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(ClubError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(ClubError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let mut settings = Settings::default();
        settings.api.base_url = "not a url".to_string();
        assert_matches!(settings.validate(), Err(ClubError::Config(_)));

        settings.api.base_url = "  ".to_string();
        assert_matches!(settings.validate(), Err(ClubError::Config(_)));
    }

    #[test]
    fn test_rejects_relative_login_path() {
        let mut settings = Settings::default();
        settings.routes.login_path = "admin/login".to_string();
        assert_matches!(settings.validate(), Err(ClubError::Config(msg)) if msg.contains("login"));
    }

    #[test]
    fn test_rejects_empty_leadership_roles() {
        let mut settings = Settings::default();
        settings.members.leadership_roles = vec![" ".to_string()];
        assert_matches!(settings.validate(), Err(ClubError::Config(_)));
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let mut settings = Settings::default();
        settings.logging.level = "verbose".to_string();
        assert_matches!(settings.validate(), Err(ClubError::Config(msg)) if msg.contains("verbose"));
    }
}
