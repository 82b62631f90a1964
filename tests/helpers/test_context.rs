//! Test context: an application context wired to the mock backend

use AaryaClub::{
    config::Settings,
    state::{AppContext, StateStorage},
};
use super::api_mock::ClubApiMock;

pub const TEST_USERNAME: &str = "admin";
pub const TEST_PASSWORD: &str = "secret";
pub const TEST_TOKEN: &str = "abc123";

pub struct TestContext {
    pub mock: ClubApiMock,
    pub app: AppContext,
}

impl TestContext {
    /// Fresh context with in-memory storage, signed out, at `/`
    pub async fn new() -> Self {
        let mock = ClubApiMock::new().await;
        let app = build_app(&mock, StateStorage::in_memory());
        Self { mock, app }
    }

    /// Fresh context already logged in as the test admin
    pub async fn signed_in() -> Self {
        let ctx = Self::new().await;
        ctx.mock.mock_login(TEST_USERNAME, TEST_PASSWORD, TEST_TOKEN).await;
        ctx.app
            .session_store
            .login(TEST_USERNAME, TEST_PASSWORD)
            .await
            .expect("Failed to log in against the mock backend");
        ctx
    }
}

pub fn test_settings(mock: &ClubApiMock) -> Settings {
    let mut settings = Settings::default();
    settings.api.base_url = mock.api_url();
    settings
}

pub fn build_app(mock: &ClubApiMock, storage: StateStorage) -> AppContext {
    AppContext::new(test_settings(mock), storage).expect("Failed to build app context")
}
