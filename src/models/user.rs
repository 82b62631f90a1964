//! User and authentication payload models

use serde::{Deserialize, Serialize};

/// The signed-in administrator as the client knows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
}

impl User {
    /// Record built after login, when only the username is known locally
    pub fn from_username(username: &str) -> Self {
        Self {
            username: username.to_string(),
            email: String::new(),
            full_name: String::new(),
        }
    }

    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub full_name: String,
}

impl From<&RegisterRequest> for User {
    fn from(request: &RegisterRequest) -> Self {
        Self {
            username: request.username.clone(),
            email: request.email.clone(),
            full_name: request.full_name.clone(),
        }
    }
}

/// Body returned by `/auth/login` and `/auth/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_token_only() {
        let response: AuthResponse = serde_json::from_str(r#"{"token": "abc123"}"#).unwrap();
        assert_eq!(response.token, "abc123");
        assert!(response.user.is_none());
    }

    #[test]
    fn test_auth_response_without_token_fails() {
        assert!(serde_json::from_str::<AuthResponse>(r#"{"message": "Login successful"}"#).is_err());
    }

    #[test]
    fn test_register_request_wire_names() {
        let request = RegisterRequest {
            username: "admin".into(),
            password: "secret1".into(),
            email: "admin@example.org".into(),
            full_name: "Club Admin".into(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["fullName"], "Club Admin");
        assert_eq!(User::from(&request).display_name(), "Club Admin");
        assert_eq!(User::from_username("admin").display_name(), "admin");
    }
}
