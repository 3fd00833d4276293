//! Session marker lifecycle against the stub backend.

use std::time::Duration;

use secrecy::SecretString;
use serde_json::json;

use clipjoint_client::{BookingClient, ClientConfig, ErrorKind};
use clipjoint_core::Email;
use clipjoint_integration_tests::{TestBackend, VALID_PASSWORD};

fn email(s: &str) -> Email {
    Email::parse(s).expect("valid test email")
}

#[tokio::test]
async fn signup_persists_response_as_session_marker() {
    let backend = TestBackend::spawn().await;
    let (client, _session) = backend.client();

    assert!(!client.is_logged_in());

    let form = json!({"name": "Ada", "email": "ada@example.com", "password": "hunter2"});
    let user = client.signup(&form).await.expect("signup");

    // The backend strips the password and assigns an id; whatever it
    // returned is what lands in the marker.
    assert_eq!(user.get("id"), Some(&json!(1)));
    assert!(user.get("password").is_none());

    assert!(client.is_logged_in());
    assert_eq!(client.local_user().expect("marker"), Some(user));
}

#[tokio::test]
async fn login_stores_exact_response_payload() {
    let backend = TestBackend::spawn().await;
    let (client, _session) = backend.client();

    let user = client
        .login(&email("a@b.com"), &SecretString::from(VALID_PASSWORD))
        .await
        .expect("login");

    assert_eq!(user, json!({"id": 1, "name": "A"}));
    assert!(client.is_logged_in());
    assert_eq!(
        client.local_user().expect("marker"),
        Some(json!({"id": 1, "name": "A"}))
    );
}

#[tokio::test]
async fn login_failure_surfaces_backend_message_string() {
    let backend = TestBackend::spawn().await;
    let (client, _session) = backend.client();

    let err = client
        .login(&email("a@b.com"), &SecretString::from("wrong"))
        .await
        .expect_err("login must fail");

    // The structured error body is reduced to its message field.
    assert_eq!(err.to_string(), "Invalid credentials");
    assert_eq!(err.kind(), ErrorKind::Backend);
    assert!(!client.is_logged_in());
}

#[tokio::test]
async fn relogin_overwrites_previous_marker() {
    let backend = TestBackend::spawn().await;
    let (client, _session) = backend.client();

    let form = json!({"name": "Ada", "email": "ada@example.com", "password": "hunter2"});
    client.signup(&form).await.expect("signup");

    client
        .login(&email("a@b.com"), &SecretString::from(VALID_PASSWORD))
        .await
        .expect("login");

    assert_eq!(
        client.local_user().expect("marker"),
        Some(json!({"id": 1, "name": "A"}))
    );
}

#[tokio::test]
async fn logout_clears_marker_synchronously() {
    let backend = TestBackend::spawn().await;
    let (client, _session) = backend.client();

    client
        .login(&email("a@b.com"), &SecretString::from(VALID_PASSWORD))
        .await
        .expect("login");
    assert!(client.is_logged_in());

    client.logout().expect("logout");

    // Logged out before the notification request can possibly complete.
    assert!(!client.is_logged_in());
    assert!(client.local_user().expect("marker").is_none());

    // The fire-and-forget notification still reaches the backend.
    for _ in 0..50 {
        if backend.hits().iter().any(|hit| hit.path == "/api/logout") {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("logout notification never arrived");
}

#[tokio::test]
async fn logout_without_login_is_not_an_error() {
    let backend = TestBackend::spawn().await;
    let (client, _session) = backend.client();

    client.logout().expect("logout");
    assert!(!client.is_logged_in());
}

#[tokio::test]
async fn login_state_subscription_observes_transitions() {
    let backend = TestBackend::spawn().await;
    let (client, _session) = backend.client();
    let mut login_state = client.subscribe_login();

    assert!(!*login_state.borrow_and_update());

    client
        .login(&email("a@b.com"), &SecretString::from(VALID_PASSWORD))
        .await
        .expect("login");
    assert!(*login_state.borrow_and_update());

    client.logout().expect("logout");
    assert!(!*login_state.borrow_and_update());
}

#[tokio::test]
async fn transport_failure_is_a_network_error() {
    // Reserve a port, then close it so the connection is refused.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let dir = tempfile::tempdir().expect("tempdir");
    let config = ClientConfig::new(
        format!("http://{addr}/api").parse().expect("url"),
        dir.path().join("session.json"),
    );
    let client = BookingClient::new(&config).expect("client");

    let err = client
        .login(&email("a@b.com"), &SecretString::from(VALID_PASSWORD))
        .await
        .expect_err("must fail");

    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(!client.is_logged_in());
}
