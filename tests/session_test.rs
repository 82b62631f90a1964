//! Session lifecycle against a mock backend: login, logout, registration
//! and forced sign-out on 401.

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use serial_test::serial;
use wiremock::{
    matchers::{any, header, method, path},
    Mock, ResponseTemplate,
};
use AaryaClub::{
    models::User,
    state::{FileBackend, RegistrationForm, Session, StateStorage, StorageBackend},
    state::storage::{TOKEN_KEY, USER_KEY},
    ClubError,
};

#[tokio::test]
#[serial]
async fn test_login_persists_token_and_placeholder_user() {
    let ctx = TestContext::new().await;
    ctx.mock.mock_login("admin", "secret", "abc123").await;

    let user = ctx.app.session_store.login("admin", "secret").await.unwrap();

    assert_eq!(user, User { username: "admin".into(), email: String::new(), full_name: String::new() });
    assert_matches!(ctx.app.session_store.session(), Session::Authenticated { token, .. } if token == "abc123");
    assert_eq!(ctx.app.session.auth_header().as_deref(), Some("Bearer abc123"));

    let backend = ctx.app.session.storage().backend();
    assert_eq!(backend.get(TOKEN_KEY).unwrap().as_deref(), Some("abc123"));
    let stored: serde_json::Value = serde_json::from_str(&backend.get(USER_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(stored["username"], "admin");
    assert_eq!(stored["email"], "");
    assert_eq!(stored["fullName"], "");
}

#[tokio::test]
#[serial]
async fn test_rejected_login_leaves_session_anonymous() {
    let ctx = TestContext::new().await;
    ctx.mock.mock_login_rejected("Invalid username or password").await;

    let err = ctx.app.session_store.login("admin", "wrong").await.unwrap_err();

    assert_eq!(err.user_message("Login failed. Please try again."), "Invalid username or password");
    assert!(!ctx.app.session_store.is_authenticated());
    assert!(ctx.app.session.storage().token().unwrap().is_none());
}

#[tokio::test]
#[serial]
async fn test_logout_clears_storage_and_header() {
    let ctx = TestContext::signed_in().await;

    ctx.app.session_store.logout();

    assert_eq!(ctx.app.session_store.session(), Session::Anonymous);
    assert!(ctx.app.session.auth_header().is_none());
    let backend = ctx.app.session.storage().backend();
    assert!(backend.get(TOKEN_KEY).unwrap().is_none());
    assert!(backend.get(USER_KEY).unwrap().is_none());
}

#[tokio::test]
#[serial]
async fn test_requests_carry_bearer_token() {
    let ctx = TestContext::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/api/members"))
        .and(header("Authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_members()))
        .expect(1)
        .mount(&ctx.mock.server)
        .await;

    let members = ctx.app.services.member_service.list().await.unwrap();

    assert_eq!(members.len(), 4);
}

#[tokio::test]
#[serial]
async fn test_unauthorized_response_signs_out_and_redirects() {
    let ctx = TestContext::signed_in().await;
    ctx.mock.mock_unauthorized("GET", "/api/events").await;
    ctx.app.router.visit("/admin/events");

    let mut page = ctx.app.events_page();
    page.mount().await.unwrap();

    assert_eq!(page.error_notice(), Some("Failed to fetch events"));
    assert!(!ctx.app.session_store.is_authenticated());
    assert!(ctx.app.session.auth_header().is_none());
    assert!(ctx.app.session.storage().token().unwrap().is_none());
    assert_eq!(ctx.app.navigator.current_path(), "/admin/login");
}

#[tokio::test]
#[serial]
async fn test_unauthorized_on_login_page_does_not_navigate() {
    let ctx = TestContext::new().await;
    ctx.mock.mock_unauthorized("POST", "/api/auth/login").await;
    ctx.app.router.visit("/admin/login");
    let depth = ctx.app.navigator.depth();

    let err = ctx.app.session_store.login("admin", "nope").await.unwrap_err();

    assert_matches!(err, ClubError::Unauthorized);
    assert_eq!(ctx.app.navigator.current_path(), "/admin/login");
    assert_eq!(ctx.app.navigator.depth(), depth);
}

#[tokio::test]
#[serial]
async fn test_register_validation_never_reaches_backend() {
    let ctx = TestContext::new().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&ctx.mock.server)
        .await;

    let mismatch = RegistrationForm {
        username: "neha".into(),
        email: "neha@example.org".into(),
        full_name: "Neha Sharma".into(),
        password: "secret1".into(),
        confirm_password: "secret2".into(),
    };
    let err = ctx.app.session_store.register(&mismatch).await.unwrap_err();
    assert_eq!(err.user_message("Registration failed"), "Passwords do not match");

    let short = RegistrationForm {
        password: "abc".into(),
        confirm_password: "abc".into(),
        ..mismatch
    };
    let err = ctx.app.session_store.register(&short).await.unwrap_err();
    assert_eq!(err.user_message("Registration failed"), "Password must be at least 6 characters long");
    assert!(!ctx.app.session_store.is_authenticated());
}

#[tokio::test]
#[serial]
async fn test_register_signs_in_with_form_details() {
    let ctx = TestContext::new().await;
    ctx.mock.mock_register("reg-token").await;

    let form = RegistrationForm {
        username: "neha".into(),
        email: "neha@example.org".into(),
        full_name: "Neha Sharma".into(),
        password: "secret1".into(),
        confirm_password: "secret1".into(),
    };
    let user = ctx.app.session_store.register(&form).await.unwrap();

    assert_eq!(user.full_name, "Neha Sharma");
    assert_eq!(user.email, "neha@example.org");
    assert_eq!(ctx.app.session.bearer_token().as_deref(), Some("reg-token"));
}

#[tokio::test]
#[serial]
async fn test_session_survives_restart_with_file_storage() {
    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join("session.json");
    let mock = ClubApiMock::new().await;
    mock.mock_login("admin", "secret", "abc123").await;

    let first = build_app(&mock, StateStorage::new(std::sync::Arc::new(FileBackend::new(&session_file))));
    first.session_store.login("admin", "secret").await.unwrap();

    let second = build_app(&mock, StateStorage::new(std::sync::Arc::new(FileBackend::new(&session_file))));
    assert!(second.session_store.restore().unwrap());
    assert_eq!(second.session_store.user().map(|u| u.username), Some("admin".to_string()));
    assert_eq!(second.session.auth_header().as_deref(), Some("Bearer abc123"));
}
