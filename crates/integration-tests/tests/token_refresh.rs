//! Integration tests for token refresh.
//!
//! Run with: cargo test -p creators-corner-integration-tests

#![allow(clippy::unwrap_used)]

use chrono::Duration;
use creators_corner_client::AuthError;
use creators_corner_integration_tests::{
    START_MS, TTL_MS, TestContext, can_bind_localhost, error_body, mount_me, token_body,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_refresh_rotates_tokens() {
    if !can_bind_localhost() {
        return;
    }
    let ctx = TestContext::new().await.logged_in().await;
    ctx.clock.advance(Duration::minutes(1));

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_json(json!({"refresh_token": "refresh-1", "mode": "json"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("access-2", Some("refresh-2"))))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let pair = ctx.session.refresh().await.unwrap();

    assert_eq!(pair.access_token, "access-2");
    assert_eq!(pair.refresh_token.as_deref(), Some("refresh-2"));
    assert_eq!(pair.expires, START_MS + 60_000 + TTL_MS);
    assert_eq!(ctx.session.auth_state(), Some(pair));
}

#[tokio::test]
async fn test_refresh_keeps_refresh_token_when_not_rotated() {
    if !can_bind_localhost() {
        return;
    }
    let ctx = TestContext::new().await.logged_in().await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("access-2", None)))
        .mount(&ctx.server)
        .await;

    let pair = ctx.session.refresh().await.unwrap();
    assert_eq!(pair.refresh_token.as_deref(), Some("refresh-1"));
}

#[tokio::test]
async fn test_rejected_refresh_token_ends_session() {
    if !can_bind_localhost() {
        return;
    }
    let ctx = TestContext::new().await.logged_in().await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(error_body("Invalid user credentials.", "INVALID_CREDENTIALS")),
        )
        .mount(&ctx.server)
        .await;

    assert!(matches!(
        ctx.session.refresh().await,
        Err(AuthError::NotAuthenticated)
    ));
    assert!(ctx.session.auth_state().is_none());
}

#[tokio::test]
async fn test_current_user_refreshes_inside_margin() {
    if !can_bind_localhost() {
        return;
    }
    let ctx = TestContext::new().await.logged_in().await;
    // Four minutes left on a fifteen minute token
    ctx.clock.advance(Duration::minutes(11));

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("access-2", Some("refresh-2"))))
        .expect(1)
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer access-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": creators_corner_integration_tests::USER_ID, "first_name": "Ada"}
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let user = ctx.session.get_current_user().await.unwrap().unwrap();
    assert_eq!(user.display_name(), "Ada");
}

#[tokio::test]
async fn test_no_refresh_outside_margin() {
    if !can_bind_localhost() {
        return;
    }
    let ctx = TestContext::new().await.logged_in().await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&ctx.server)
        .await;
    mount_me(&ctx.server).await;

    assert!(ctx.session.get_current_user().await.unwrap().is_some());
}
