//! REST API client
//!
//! Thin wrapper over `reqwest` for the club backend. Every request carries
//! the bearer token when one is available. A 401 response clears the
//! session and sends the user to the login page, unless they are already
//! there; the 401 is still returned to the caller.

use std::sync::Arc;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;
use crate::config::Settings;
use crate::middleware::logging::RequestLogger;
use crate::state::navigation::Navigator;
use crate::state::session::SessionContext;
use crate::utils::errors::{ClubError, Result};
use crate::utils::helpers::normalize_api_base;
use crate::utils::logging::log_redirect;

/// HTTP client for the club REST API
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    login_path: String,
    session: Arc<SessionContext>,
    navigator: Navigator,
    logger: RequestLogger,
}

impl ApiClient {
    /// Create a new ApiClient instance
    pub fn new(settings: &Settings, session: Arc<SessionContext>, navigator: Navigator) -> Result<Self> {
        let base_url = normalize_api_base(&settings.api.base_url);
        Url::parse(&base_url)?;

        let client = Client::builder()
            .user_agent(settings.api.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url,
            login_path: settings.routes.login_path.clone(),
            session,
            navigator,
            logger: RequestLogger::default(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an API path such as `/events/3`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(Method::GET, path, None::<&()>).await?;
        decode_json(response).await
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        decode_json(response).await
    }

    /// POST returning the backend's status string
    pub async fn post_text<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<String> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        decode_text(response).await
    }

    /// PUT returning the backend's status string
    pub async fn put_text<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<String> {
        let response = self.send(Method::PUT, path, Some(body)).await?;
        decode_text(response).await
    }

    /// DELETE returning the backend's status string
    pub async fn delete_text(&self, path: &str) -> Result<String> {
        let response = self.send(Method::DELETE, path, None::<&()>).await?;
        decode_text(response).await
    }

    async fn send<B: Serialize + ?Sized>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Response> {
        let token = self.session.bearer_token();
        let span = self.logger.start(&method, path, token.is_some());

        let mut request: RequestBuilder = self
            .client
            .request(method, self.endpoint(path))
            .header("X-Request-Id", &span.request_id);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                self.logger.failed(&span, &e);
                return Err(ClubError::Http(e));
            }
        };

        let status = response.status();
        self.logger.finish(&span, status);

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
            return Err(ClubError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClubError::Api {
                status,
                message: error_message_from_body(&body),
            });
        }

        Ok(response)
    }

    fn handle_unauthorized(&self) {
        self.session.invalidate();

        let current = self.navigator.current_path();
        if current.trim_end_matches('/') == self.login_path.trim_end_matches('/') {
            return;
        }
        log_redirect(&current, &self.login_path, "unauthorized");
        self.navigator.navigate(&self.login_path, false);
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ClubError::InvalidResponse(e.to_string()))
}

/// Status strings come back as `text/plain`; tolerate a JSON-quoted string too
async fn decode_text(response: Response) -> Result<String> {
    let text = response.text().await?;
    let trimmed = text.trim();
    if trimmed.starts_with('"') {
        if let Ok(unquoted) = serde_json::from_str::<String>(trimmed) {
            return Ok(unquoted);
        }
    }
    Ok(trimmed.to_string())
}

/// The backend answers errors with a plain string, or with a JSON error
/// document carrying `message`/`error`.
pub fn error_message_from_body(body: &str) -> String {
    let trimmed = body.trim();
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(trimmed) {
        for key in ["message", "error"] {
            if let Some(serde_json::Value::String(text)) = map.get(key) {
                if !text.trim().is_empty() {
                    return text.trim().to_string();
                }
            }
        }
        return String::new();
    }
    if let Ok(serde_json::Value::String(text)) = serde_json::from_str::<serde_json::Value>(trimmed) {
        return text;
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::storage::StateStorage;

    #[test]
    fn test_endpoint_joins_under_api() {
        let mut settings = Settings::default();
        settings.api.base_url = "http://localhost:8080/".to_string();
        let client = ApiClient::new(
            &settings,
            SessionContext::new(StateStorage::in_memory()),
            Navigator::default(),
        )
        .unwrap();

        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert_eq!(client.endpoint("/events/3"), "http://localhost:8080/api/events/3");
        assert_eq!(client.endpoint("members"), "http://localhost:8080/api/members");
    }

    #[test]
    fn test_error_message_from_body() {
        assert_eq!(error_message_from_body("Invalid username or password"), "Invalid username or password");
        assert_eq!(
            error_message_from_body(r#"{"status":500,"error":"Internal Server Error","message":"Event not found"}"#),
            "Event not found"
        );
        assert_eq!(error_message_from_body(r#"{"status":500,"error":"Internal Server Error","message":""}"#), "Internal Server Error");
        assert_eq!(error_message_from_body(r#""Username already exists""#), "Username already exists");
        assert_eq!(error_message_from_body(""), "");
    }
}
