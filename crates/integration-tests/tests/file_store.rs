//! Integration tests for sessions persisted to disk.
//!
//! Run with: cargo test -p creators-corner-integration-tests

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use creators_corner_client::FileStore;
use creators_corner_integration_tests::{
    START_MS, TTL_MS, TestContext, can_bind_localhost, session_for, start_clock,
};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_session_survives_restart() {
    if !can_bind_localhost() {
        return;
    }
    let dir = TempDir::new().unwrap();
    let ctx = TestContext::with_store(Arc::new(FileStore::new(dir.path())))
        .await
        .logged_in()
        .await;

    assert!(dir.path().join("directus_auth.json").exists());

    // A new process: fresh client and store over the same directory
    let reopened = session_for(
        &ctx.server.uri(),
        FileStore::new(dir.path()),
        start_clock(),
    );
    let pair = reopened.auth_state().unwrap();
    assert_eq!(pair.access_token, "access-1");
    assert_eq!(pair.expires, START_MS + TTL_MS);
    assert!(!reopened.is_token_expired());
}

#[tokio::test]
async fn test_logout_removes_file() {
    if !can_bind_localhost() {
        return;
    }
    let dir = TempDir::new().unwrap();
    let ctx = TestContext::with_store(Arc::new(FileStore::new(dir.path())))
        .await
        .logged_in()
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&ctx.server)
        .await;

    ctx.session.logout().await.unwrap();

    assert!(!dir.path().join("directus_auth.json").exists());
    assert!(ctx.session.is_token_expired());
}

#[tokio::test]
async fn test_corrupt_file_counts_as_logged_out() {
    if !can_bind_localhost() {
        return;
    }
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("directus_auth.json"), "{not json").unwrap();

    let ctx = TestContext::with_store(Arc::new(FileStore::new(dir.path()))).await;

    assert!(ctx.session.auth_state().is_none());
    assert!(ctx.session.is_token_expired());
    assert!(ctx.session.get_current_user().await.unwrap().is_none());
}
