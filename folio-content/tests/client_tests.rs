//! Content API Client Tests
//!
//! Admin operations against a local axum server: login, bearer header
//! propagation, CRUD, and status mapping.

mod helpers;

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use folio_common::api::{Credentials, Resource};
use folio_content::FetchError;
use serde_json::{json, Value};

const TOKEN: &str = "test-session-token";

fn is_authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TOKEN))
        .unwrap_or(false)
}

/// Minimal content API: login plus an articles collection that requires
/// the bearer token for writes
fn test_app() -> Router {
    Router::new()
        .route(
            "/api/auth/login",
            post(|Json(body): Json<Value>| async move {
                if body["email"] == "editor@example.com" && body["password"] == "hunter2" {
                    (StatusCode::OK, Json(json!({"accessToken": TOKEN})))
                } else {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({"message": "Invalid credentials"})),
                    )
                }
            }),
        )
        .route(
            "/api/articles",
            get(|| async { Json(json!([{"id": 1, "title": "Listed"}])) }).post(
                |headers: HeaderMap, Json(mut body): Json<Value>| async move {
                    if !is_authorized(&headers) {
                        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "No token"})));
                    }
                    body["id"] = json!("new-1");
                    (StatusCode::CREATED, Json(json!({"data": body})))
                },
            ),
        )
        .route(
            "/api/articles/:id",
            get(|Path(id): Path<String>| async move {
                if id == "1" {
                    (StatusCode::OK, Json(json!({"id": 1, "title": "Listed"})))
                } else {
                    (
                        StatusCode::NOT_FOUND,
                        Json(json!({"message": "Article not found"})),
                    )
                }
            })
            .put(
                |headers: HeaderMap, Path(id): Path<String>, Json(mut body): Json<Value>| async move {
                    if !is_authorized(&headers) {
                        return (StatusCode::FORBIDDEN, Json(json!({"error": "Forbidden"})));
                    }
                    body["id"] = json!(id);
                    (StatusCode::OK, Json(body))
                },
            )
            .delete(|headers: HeaderMap| async move {
                if is_authorized(&headers) {
                    StatusCode::NO_CONTENT
                } else {
                    StatusCode::UNAUTHORIZED
                }
            }),
        )
        .route(
            "/api/articles/title/:title",
            get(|Path(title): Path<String>| async move {
                Json(json!({"data": {"id": 7, "title": title}}))
            }),
        )
}

fn valid_article() -> Value {
    json!({
        "title": "A New Essay",
        "section": "magazine",
        "publishedAt": "2024-05-01",
        "featured": false
    })
}

// ========================================
// Auth
// ========================================

#[tokio::test]
async fn test_login_returns_bearer_credentials() {
    let base_url = helpers::spawn_server(test_app()).await;
    let client = helpers::anonymous_client(&base_url);

    let credentials = client.login("editor@example.com", "hunter2").await.unwrap();
    assert_eq!(credentials.token(), Some(TOKEN));
    assert_eq!(
        credentials.authorization_header().as_deref(),
        Some("Bearer test-session-token")
    );
}

#[tokio::test]
async fn test_login_rejected() {
    let base_url = helpers::spawn_server(test_app()).await;
    let client = helpers::anonymous_client(&base_url);

    let err = client.login("editor@example.com", "wrong").await.unwrap_err();
    match err {
        FetchError::Unauthorized(message) => assert_eq!(message, "Invalid credentials"),
        other => panic!("expected Unauthorized, got {:?}", other),
    }
}

// ========================================
// CRUD
// ========================================

#[tokio::test]
async fn test_writes_carry_bearer_token() {
    let base_url = helpers::spawn_server(test_app()).await;
    let anonymous = helpers::anonymous_client(&base_url);

    // Anonymous writes are refused by the server
    let err = anonymous
        .create(Resource::Articles, &valid_article())
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Unauthorized(_)), "{:?}", err);

    // The same client with credentials succeeds
    let client = anonymous.with_credentials(Credentials::bearer(TOKEN));
    let created = client.create(Resource::Articles, &valid_article()).await.unwrap();
    assert_eq!(created["id"], "new-1");
    assert_eq!(created["title"], "A New Essay");

    let updated = client
        .update(Resource::Articles, "1", &valid_article())
        .await
        .unwrap();
    assert_eq!(updated["id"], "1");

    client.delete(Resource::Articles, "1").await.unwrap();
}

#[tokio::test]
async fn test_reads() {
    let base_url = helpers::spawn_server(test_app()).await;
    let client = helpers::anonymous_client(&base_url);

    let list = client.list(Resource::Articles).await.unwrap();
    assert_eq!(list.len(), 1);

    let one = client.get_by_id(Resource::Articles, "1").await.unwrap();
    assert_eq!(one["title"], "Listed");

    let by_title = client
        .get_by_title(Resource::Articles, "Slow Philosophy")
        .await
        .unwrap();
    assert_eq!(by_title["title"], "Slow Philosophy");
    assert_eq!(by_title["id"], 7);
}

#[tokio::test]
async fn test_missing_record_maps_to_not_found() {
    let base_url = helpers::spawn_server(test_app()).await;
    let client = helpers::anonymous_client(&base_url);

    let err = client.get_by_id(Resource::Articles, "404").await.unwrap_err();
    match err {
        FetchError::NotFound(message) => assert_eq!(message, "Article not found"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_forbidden_maps_to_unauthorized() {
    let base_url = helpers::spawn_server(test_app()).await;
    let client = helpers::anonymous_client(&base_url);

    let err = client
        .update(Resource::Articles, "1", &valid_article())
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Unauthorized(_)), "{:?}", err);
}

// ========================================
// Validation
// ========================================

#[tokio::test]
async fn test_invalid_payload_never_reaches_network() {
    // Nothing listens here: a network attempt would surface as Network
    let base_url = helpers::dead_server_url().await;
    let client = helpers::anonymous_client(&base_url).with_credentials(Credentials::bearer(TOKEN));

    let payload = json!({"title": "", "section": "not-a-section", "featured": "maybe"});
    let err = client.create(Resource::Articles, &payload).await.unwrap_err();

    match err {
        FetchError::Validation(errors) => {
            assert!(errors.has("title"));
            assert!(errors.has("section"));
            assert!(errors.has("featured"));
        }
        other => panic!("expected Validation, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let base_url = helpers::dead_server_url().await;
    let client = helpers::anonymous_client(&base_url);

    let err = client.list(Resource::Shop).await.unwrap_err();
    assert!(matches!(err, FetchError::Network(_)), "{:?}", err);

    let outcome = client.fetch_list(Resource::Shop).await;
    assert!(outcome.failed());
    assert!(outcome.records.is_empty());
}
