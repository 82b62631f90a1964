//! Form validation
//!
//! Field checks run before any network call; failures never reach the backend.

use std::sync::OnceLock;
use regex::Regex;
use crate::models::{CreateEventRequest, CreateMemberRequest, RegisterRequest};
use crate::utils::errors::{ClubError, Result};
use crate::utils::helpers::parse_event_date;

pub const MIN_PASSWORD_LENGTH: usize = 6;

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
    })
}

fn require(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClubError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

fn require_email(value: &str) -> Result<()> {
    require(value, "Email")?;
    if !email_pattern().is_match(value.trim()) {
        return Err(ClubError::Validation(format!("'{}' is not a valid email address", value.trim())));
    }
    Ok(())
}

/// A form a CRUD page submits
pub trait FormData: Clone + Default + Send + Sync + std::fmt::Debug {
    fn validate(&self) -> Result<()>;
}

impl FormData for CreateEventRequest {
    fn validate(&self) -> Result<()> {
        require(&self.title, "Title")?;
        require(&self.date, "Date")?;
        require(&self.description, "Description")?;

        if parse_event_date(&self.date).is_none() {
            return Err(ClubError::Validation(format!(
                "Date '{}' must be YYYY-MM-DD or an ISO timestamp",
                self.date
            )));
        }
        if let Some(max) = self.max_participants {
            if max <= 0 {
                return Err(ClubError::Validation(
                    "Max participants must be greater than 0".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl FormData for CreateMemberRequest {
    fn validate(&self) -> Result<()> {
        require(&self.name, "Name")?;
        require(&self.position, "Position")?;
        require_email(&self.email)
    }
}

/// Registration form as entered, including the confirmation field
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Check the form and produce the request the backend expects
    pub fn validate(&self) -> Result<RegisterRequest> {
        if self.password != self.confirm_password {
            return Err(ClubError::Validation("Passwords do not match".to_string()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ClubError::Validation(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            )));
        }
        require(&self.username, "Username")?;
        require(&self.full_name, "Full name")?;
        require_email(&self.email)?;

        Ok(RegisterRequest {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            email: self.email.trim().to_string(),
            full_name: self.full_name.trim().to_string(),
        })
    }
}
