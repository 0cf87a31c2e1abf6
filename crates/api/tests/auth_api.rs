//! HTTP-level integration tests for login and token handling.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, token_for, ADMIN, CONTRIBUTOR, MANAGER};
use scorecard_db::{MemoryStore, Store};

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_returns_token_and_actor() {
    let app = common::seeded_app();

    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "actor_id": MANAGER }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["expires_in"], 15 * 60);
    assert_eq!(json["actor"]["id"], MANAGER);
    assert_eq!(json["actor"]["name"], "Deepak Gaba");
    assert_eq!(json["actor"]["role"], "manager");
}

#[tokio::test]
async fn login_token_works_for_me() {
    let app = common::seeded_app();

    let login = post_json(
        app.clone(),
        "/api/v1/auth/login",
        serde_json::json!({ "actor_id": CONTRIBUTOR }),
    )
    .await;
    let token = body_json(login).await["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Saurabh");
    assert_eq!(json["data"]["manager_id"], MANAGER);
}

#[tokio::test]
async fn login_unknown_actor_returns_401() {
    let app = common::seeded_app();

    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "actor_id": 999 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_login_body_is_rejected() {
    let app = common::seeded_app();

    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "actor": "Saurabh" }),
    )
    .await;

    assert!(response.status().is_client_error());
}

// ---------------------------------------------------------------------------
// Token enforcement
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_token_returns_401() {
    let app = common::seeded_app();
    let response = get(app, "/api/v1/scorecards").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn garbage_token_returns_401() {
    let app = common::seeded_app();
    let response = get_auth(app, "/api/v1/auth/me", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_for_deleted_actor_returns_401() {
    let store = Arc::new(MemoryStore::seeded().unwrap());
    let app = common::build_test_app(store.clone());
    let token = token_for(ADMIN, "administrator");

    store.delete_actor(ADMIN).await.unwrap();

    let response = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn role_is_read_from_store_not_token() {
    let app = common::seeded_app();
    // Claims say administrator, but actor 1 is a contributor.
    let forged = token_for(CONTRIBUTOR, "administrator");

    let response = get_auth(app, "/api/v1/admin/actors", &forged).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
