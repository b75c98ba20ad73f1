//! Integration tests for Creators Corner.
//!
//! The tests drive a real [`AuthSession`] over HTTP against a `wiremock`
//! server that answers like Directus. No Directus instance is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p creators-corner-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `session_lifecycle` - login, logout, current user, expiry
//! - `token_refresh` - refresh and early refresh
//! - `collections` - typed collection reads
//! - `file_store` - sessions persisted to disk

use std::net::TcpListener;
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use creators_corner_client::{
    AuthSession, ClientConfig, DirectusClient, KeyValueStore, ManualClock, MemoryStore,
};
use secrecy::SecretString;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Fixed start time for session clocks, 2023-11-14T22:13:20Z.
pub const START_MS: i64 = 1_700_000_000_000;

/// Access token lifetime the mock server reports, 15 minutes.
pub const TTL_MS: i64 = 900_000;

/// User id carried by [`jwt`] tokens and the `/users/me` fixture.
pub const USER_ID: &str = "0f8b3a4e-6a2c-4f59-9d7e-8c1e2b3a4d5f";

/// Session type used by the tests.
pub type TestSession<S = Arc<MemoryStore>> = AuthSession<DirectusClient, S, Arc<ManualClock>>;

/// Whether the sandbox lets us open a local listener for the mock server.
#[must_use]
pub fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

/// A mock Directus instance plus the session talking to it.
pub struct TestContext<S = Arc<MemoryStore>> {
    pub server: MockServer,
    pub session: TestSession<S>,
    pub store: S,
    pub clock: Arc<ManualClock>,
}

impl TestContext {
    /// Start a mock server and an in-memory session against it.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be configured for the mock server.
    pub async fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new())).await
    }
}

impl<S: KeyValueStore + Clone> TestContext<S> {
    /// Start a mock server and a session persisting to `store`.
    pub async fn with_store(store: S) -> Self {
        let server = MockServer::start().await;
        let clock = start_clock();
        let session = session_for(&server.uri(), store.clone(), Arc::clone(&clock));
        Self {
            server,
            session,
            store,
            clock,
        }
    }

    /// Log in through a mocked `/auth/login`.
    ///
    /// # Panics
    ///
    /// Panics if the login fails.
    #[allow(clippy::unwrap_used)]
    pub async fn logged_in(self) -> Self {
        mount_login_ok(&self.server, "access-1", Some("refresh-1")).await;
        self.session
            .login("maker@example.com", &SecretString::from("hunter2"))
            .await
            .unwrap();
        self
    }
}

/// A manual clock stopped at [`START_MS`].
///
/// # Panics
///
/// Never; the start time is representable.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn start_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        DateTime::<Utc>::from_timestamp_millis(START_MS).unwrap(),
    ))
}

/// A session against `base_url` with the given store and clock.
///
/// # Panics
///
/// Panics if `base_url` is not a valid http(s) URL.
#[allow(clippy::unwrap_used)]
pub fn session_for<S: KeyValueStore>(
    base_url: &str,
    store: S,
    clock: Arc<ManualClock>,
) -> TestSession<S> {
    let config = ClientConfig::new(base_url).unwrap();
    let api = DirectusClient::new(&config).unwrap();
    AuthSession::with_clock(api, store, clock).with_refresh_margin(config.refresh_margin)
}

/// An unsigned JWT carrying Directus-style claims for [`USER_ID`].
#[must_use]
pub fn jwt(admin_access: bool) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = json!({
        "id": USER_ID,
        "role": null,
        "app_access": true,
        "admin_access": admin_access,
        "iat": START_MS / 1000,
        "exp": (START_MS + TTL_MS) / 1000,
        "iss": "directus"
    });
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.signature")
}

/// Directus token response body.
#[must_use]
pub fn token_body(access_token: &str, refresh_token: Option<&str>) -> Value {
    json!({
        "data": {
            "access_token": access_token,
            "expires": TTL_MS,
            "refresh_token": refresh_token
        }
    })
}

/// Directus error body.
#[must_use]
pub fn error_body(message: &str, code: &str) -> Value {
    json!({"errors": [{"message": message, "extensions": {"code": code}}]})
}

/// `/auth/login` accepts any credentials and issues the given tokens.
pub async fn mount_login_ok(server: &MockServer, access_token: &str, refresh_token: Option<&str>) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_partial_json(json!({"mode": "json"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(access_token, refresh_token)))
        .mount(server)
        .await;
}

/// `/auth/login` rejects every attempt like Directus does.
pub async fn mount_login_rejected(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(error_body(
            "Invalid user credentials.",
            "INVALID_CREDENTIALS",
        )))
        .mount(server)
        .await;
}

/// `/users/me` returns the fixture user for any bearer token.
pub async fn mount_me(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": USER_ID,
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com",
                "avatar": null,
                "role": null
            }
        })))
        .mount(server)
        .await;
}
