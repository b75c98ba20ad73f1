//! Integration tests for typed collection reads.
//!
//! Run with: cargo test -p creators-corner-integration-tests

#![allow(clippy::unwrap_used)]

use creators_corner_client::{AuthError, Query};
use creators_corner_core::{Category, Creator, CreatorId, DirectusFile, ItemStatus, Work};
use creators_corner_integration_tests::{TestContext, can_bind_localhost, error_body};
use serde_json::json;
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_public_read_before_login() {
    if !can_bind_localhost() {
        return;
    }
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .and(path("/items/creators"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(400))
        .expect(0)
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/items/creators"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": 7,
                "status": "published",
                "name": "Studio Kiln",
                "slug": "studio-kiln",
                "instagram": "@studiokiln"
            }]
        })))
        .mount(&ctx.server)
        .await;

    let creators: Vec<Creator> = ctx.session.read_items(&Query::new()).await.unwrap();

    let creator = creators.first().unwrap();
    assert_eq!(creator.id, CreatorId::new(7));
    assert_eq!(creator.status, ItemStatus::Published);
    assert_eq!(creator.extra.get("instagram"), Some(&json!("@studiokiln")));
}

#[tokio::test]
async fn test_authenticated_read_with_query() {
    if !can_bind_localhost() {
        return;
    }
    let ctx = TestContext::new().await.logged_in().await;

    Mock::given(method("GET"))
        .and(path("/items/works"))
        .and(header("authorization", "Bearer access-1"))
        .and(query_param("fields", "id,title,status"))
        .and(query_param("limit", "2"))
        .and(query_param("sort", "-date_created"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": 2, "title": "Glaze study", "status": "draft"},
                {"id": 1, "title": "Moon jar", "status": "published"}
            ]
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let query = Query::new()
        .fields(["id", "title", "status"])
        .limit(2)
        .sort("-date_created");
    let works: Vec<Work> = ctx.session.read_items(&query).await.unwrap();

    assert_eq!(works.len(), 2);
    assert!(works.iter().any(|w| w.status.is_public()));
}

#[tokio::test]
async fn test_files_and_categories_endpoints() {
    if !can_bind_localhost() {
        return;
    }
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": "5b1c3a9e-0d2f-4e8a-9b7c-6d5e4f3a2b1c",
                "filename_download": "moon-jar.jpg",
                "type": "image/jpeg",
                "filesize": "123456"
            }]
        })))
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/items/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 1, "name": "Ceramics"}]
        })))
        .mount(&ctx.server)
        .await;

    let files: Vec<DirectusFile> = ctx.session.read_items(&Query::new()).await.unwrap();
    let file = files.first().unwrap();
    assert!(file.is_image());
    assert_eq!(
        file.asset_path(),
        "assets/5b1c3a9e-0d2f-4e8a-9b7c-6d5e4f3a2b1c"
    );

    let categories: Vec<Category> = ctx.session.read_items(&Query::new()).await.unwrap();
    assert_eq!(categories.first().map(|c| c.name.as_str()), Some("Ceramics"));
}

#[tokio::test]
async fn test_forbidden_collection_is_api_error() {
    if !can_bind_localhost() {
        return;
    }
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .and(path("/items/works"))
        .respond_with(ResponseTemplate::new(403).set_body_json(error_body(
            "You don't have permission to access this.",
            "FORBIDDEN",
        )))
        .mount(&ctx.server)
        .await;

    let err = ctx
        .session
        .read_items::<Work>(&Query::new())
        .await
        .unwrap_err();

    assert!(err.requires_login());
    assert!(matches!(err, AuthError::Api(ref api) if api.code.as_deref() == Some("FORBIDDEN")));
}
