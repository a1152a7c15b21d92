#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use coauthor_api::config::{IdentityConfig, ServerConfig};
use coauthor_api::router::build_app_router;
use coauthor_api::state::AppState;
use coauthor_core::identity::{FixedIdentityProvider, Identity};

// ---------------------------------------------------------------------------
// Fixed identities
// ---------------------------------------------------------------------------

pub const ALICE: &str = "uid-alice";
pub const BOB: &str = "uid-bob";
pub const CAROL: &str = "uid-carol";

pub const ALICE_TOKEN: &str = "token-alice";
pub const BOB_TOKEN: &str = "token-bob";
pub const CAROL_TOKEN: &str = "token-carol";

pub fn identity(uid: &str, name: &str) -> Identity {
    Identity {
        uid: uid.to_string(),
        email: Some(format!("{name}@example.com")),
        display_name: Some(name.to_string()),
        photo_url: None,
    }
}

/// Provider with three known users and one bearer token each.
pub fn test_identity_provider() -> FixedIdentityProvider {
    FixedIdentityProvider::new()
        .with_user(identity(ALICE, "alice"))
        .with_user(identity(BOB, "bob"))
        .with_user(identity(CAROL, "carol"))
        .with_token(ALICE_TOKEN, ALICE)
        .with_token(BOB_TOKEN, BOB)
        .with_token(CAROL_TOKEN, CAROL)
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults. The identity base URL is
/// never contacted -- tests inject [`FixedIdentityProvider`] instead.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        identity: IdentityConfig {
            base_url: "http://identity.invalid".to_string(),
            api_key: None,
            timeout_secs: 5,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and the fixed identity provider.
///
/// This goes through the same [`build_app_router`] as production, so
/// integration tests exercise the real middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(
        pool,
        Arc::new(config.clone()),
        Arc::new(test_identity_provider()),
    );
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, "GET", uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "GET", uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, "POST", uri, None, Some(json)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    json: serde_json::Value,
) -> Response<Body> {
    send(app, "POST", uri, Some(token), Some(json)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "POST", uri, Some(token), None).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    json: serde_json::Value,
) -> Response<Body> {
    send(app, "PATCH", uri, Some(token), Some(json)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "DELETE", uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a document through the API and return its id.
pub async fn create_document(pool: &PgPool, token: &str, title: &str) -> i64 {
    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/document",
        token,
        serde_json::json!({ "title": title }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["document_id"].as_i64().expect("document_id must be a number")
}
