//! Authentication service implementation
//!
//! Calls the backend's login and registration endpoints. Holding on to the
//! result is the session store's job.

use tracing::debug;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest};
use crate::utils::errors::Result;
use super::api::ApiClient;

const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/auth/register";

/// Authentication endpoints
#[derive(Clone, Debug)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `POST /auth/login`
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        debug!(username = %username, "Logging in");
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.api.post_json(LOGIN_PATH, &request).await
    }

    /// `POST /auth/register`
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        debug!(username = %request.username, "Registering");
        self.api.post_json(REGISTER_PATH, request).await
    }
}
