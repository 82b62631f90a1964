//! Mock club backend for testing
//!
//! Wraps a wiremock server that answers the way the club's REST API does:
//! JSON for reads and login, plain-text status strings for mutations.

use serde_json::{json, Value};
use wiremock::{
    matchers::{body_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

pub struct ClubApiMock {
    pub server: MockServer,
}

impl ClubApiMock {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL the client should be configured with
    pub fn api_url(&self) -> String {
        format!("{}/api", self.server.uri())
    }

    /// Accept exactly these credentials and hand out `token`
    pub async fn mock_login(&self, username: &str, password: &str, token: &str) {
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(json!({ "username": username, "password": password })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": token,
                "message": "Login successful",
                "user": { "username": username }
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_login_rejected(&self, message: &str) {
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(400).set_body_string(message))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_register(&self, token: &str) {
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": token,
                "message": "User registered successfully"
            })))
            .mount(&self.server)
            .await;
    }

    /// Serve `body` for the collection GET
    pub async fn mock_list(&self, collection: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api/{}", collection)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Serve `body` for the next `times` collection GETs only
    pub async fn mock_list_times(&self, collection: &str, body: Value, times: u64) {
        Mock::given(method("GET"))
            .and(path(format!("/api/{}", collection)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .up_to_n_times(times)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_status(&self, http_method: &str, route: &str, status: u16, body: &str) {
        Mock::given(method(http_method))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Respond 401 to everything under `route`
    pub async fn mock_unauthorized(&self, http_method: &str, route: &str) {
        self.mock_status(http_method, route, 401, "").await;
    }

    pub async fn reset(&self) {
        self.server.reset().await;
    }
}
