#![allow(dead_code)]

use memogenius::api::ApiClient;
use memogenius::session::{MemoryTokenStore, Session};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Credential and id the stub login endpoint hands out.
pub const STUB_TOKEN: &str = "t1";
pub const STUB_USER_ID: i64 = 42;

/// Build a logged-out session against `server`, backed by a shared in-memory store.
pub fn test_session(server: &MockServer) -> (Session, MemoryTokenStore) {
    let store = MemoryTokenStore::new();
    let api = ApiClient::with_base_url(format!("{}/api", server.uri())).unwrap();
    (Session::open(api, store.clone()), store)
}

/// Mount a web-login endpoint that accepts any key.
pub async fn mount_login_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/auth/web-login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": STUB_USER_ID,
            "access_key": "MG-VALID",
            "telegram_id": 1234,
            "web_token": STUB_TOKEN,
            "created_at": "2024-01-01T00:00:00"
        })))
        .mount(server)
        .await;
}

/// A session already logged in as [`STUB_USER_ID`] with credential [`STUB_TOKEN`].
pub async fn logged_in_session(server: &MockServer) -> (Session, MemoryTokenStore) {
    mount_login_ok(server).await;
    let (mut session, store) = test_session(server);
    assert!(session.login("MG-VALID").await, "stub login should succeed");
    (session, store)
}

/// A reminder record as the backend serializes it.
pub fn reminder_json(id: i64, text: &str, due_date: &str) -> serde_json::Value {
    json!({
        "id": id,
        "user_id": STUB_USER_ID,
        "text": text,
        "due_date": due_date,
        "is_active": true,
        "created_at": "2023-12-31T09:00:00",
        "updated_at": null
    })
}
