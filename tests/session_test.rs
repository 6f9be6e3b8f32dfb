mod helpers;

use helpers::{mount_login_ok, test_session, STUB_TOKEN, STUB_USER_ID};
use memogenius::api::ApiClient;
use memogenius::session::types::{USER_ID_KEY, WEB_TOKEN_KEY};
use memogenius::session::{FileTokenStore, Session, SessionScope, TokenStore, UserId};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn device_token_is_stable_until_logout() {
    let server = MockServer::start().await;
    let (mut session, _store) = test_session(&server);

    let first = session.ensure_device_token().unwrap();
    let second = session.ensure_device_token().unwrap();
    assert_eq!(first, second);

    session.logout();
    let third = session.ensure_device_token().unwrap();
    assert_ne!(first, third, "logout must discard the device token");
}

#[tokio::test]
async fn successful_login_resolves_identity_and_attaches_bearer() {
    let server = MockServer::start().await;
    let (mut session, store) = test_session(&server);
    let device_token = session.ensure_device_token().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/auth/web-login"))
        .and(body_json(json!({
            "access_key": "MG-VALID",
            "web_token": device_token.as_str()
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "web_token": STUB_TOKEN,
            "id": STUB_USER_ID
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/reminders/"))
        .and(header("authorization", "Bearer t1"))
        .and(query_param("user_id", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    assert!(session.login("MG-VALID").await);
    assert_eq!(session.user_id(), Some(UserId(42)));
    assert_eq!(store.get(WEB_TOKEN_KEY).unwrap().as_deref(), Some(STUB_TOKEN));
    assert_eq!(store.get(USER_ID_KEY).unwrap().as_deref(), Some("42"));

    let scope = session.scope().expect("logged in session has a scope");
    let reminders = scope.list_reminders(0, 100).await.unwrap();
    assert!(reminders.is_empty());
}

#[tokio::test]
async fn rejected_login_leaves_state_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/web-login"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Invalid access key"})),
        )
        .mount(&server)
        .await;

    let (mut session, store) = test_session(&server);
    store.set(WEB_TOKEN_KEY, "existing-token").unwrap();

    assert!(!session.login("bad-key").await);
    assert_eq!(session.user_id(), None);
    assert!(session.credential().is_none());
    assert!(session.scope().is_none());
    assert_eq!(
        store.get(WEB_TOKEN_KEY).unwrap().as_deref(),
        Some("existing-token")
    );
    assert_eq!(store.get(USER_ID_KEY).unwrap(), None);
}

#[tokio::test]
async fn rejection_detail_is_surfaced_by_try_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/web-login"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Invalid access key"})),
        )
        .mount(&server)
        .await;

    let (mut session, _store) = test_session(&server);
    let err = session.try_login("bad-key").await.unwrap_err();
    assert!(err.to_string().contains("Invalid access key"), "{err}");
}

#[tokio::test]
async fn server_error_is_a_plain_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/web-login"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (mut session, store) = test_session(&server);
    assert!(!session.login("MG-VALID").await);
    assert!(!session.is_authenticated());
    assert!(store.is_empty());
}

#[tokio::test]
async fn failed_login_keeps_an_earlier_session() {
    let server = MockServer::start().await;
    let (mut session, store) = helpers::logged_in_session(&server).await;
    server.reset().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/web-login"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(!session.login("MG-OTHER").await);
    assert_eq!(session.user_id(), Some(UserId(STUB_USER_ID)));
    assert_eq!(store.get(WEB_TOKEN_KEY).unwrap().as_deref(), Some(STUB_TOKEN));
}

#[tokio::test]
async fn logout_clears_identity_and_storage() {
    let server = MockServer::start().await;
    let (mut session, store) = helpers::logged_in_session(&server).await;

    session.logout();

    assert_eq!(session.user_id(), None);
    assert!(session.credential().is_none());
    assert!(session.scope().is_none());
    assert!(store.is_empty());
}

#[tokio::test]
async fn login_survives_process_restart_with_file_store() {
    let server = MockServer::start().await;
    mount_login_ok(&server).await;
    let dir = tempfile::tempdir().unwrap();
    let session_path = dir.path().join("session.json");
    let base_url = format!("{}/api", server.uri());

    let mut first = Session::open(
        ApiClient::with_base_url(&base_url).unwrap(),
        FileTokenStore::new(&session_path),
    );
    assert!(first.login("MG-VALID").await);
    drop(first);

    let mut second = Session::open(
        ApiClient::with_base_url(&base_url).unwrap(),
        FileTokenStore::new(&session_path),
    );
    assert!(!second.is_authenticated());
    assert!(second.restore().unwrap());
    assert_eq!(second.user_id(), Some(UserId(STUB_USER_ID)));
    assert_eq!(second.credential().map(|c| c.as_str()), Some(STUB_TOKEN));
}
