mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn login_issues_a_usable_token() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "username": "admin", "password": "admin123" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["username"], "admin");
    assert_eq!(body["user"]["role"], "Admin");

    let token = body["token"].as_str().unwrap();
    let (status, _) = app.get("/api/v1/quotes", token).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn login_rejects_bad_and_missing_credentials() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "username": "admin", "password": "wrong" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid credentials");

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "username": "admin" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username and password required");
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let app = TestApp::new().await;

    for uri in [
        "/api/v1/quotes",
        "/api/v1/claims",
        "/api/v1/trucks",
        "/api/v1/inventory",
        "/api/v1/activities",
        "/api/v1/stats",
        "/api/v1/schedule",
    ] {
        let (status, _) = app.request(Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "expected 401 for {uri}");
    }

    let (status, _) = app
        .request(Method::GET, "/api/v1/quotes", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_admin_tokens_are_forbidden() {
    let app = TestApp::new().await;

    // A valid token whose role claim is not Admin
    let viewer = swiftmove_api::models::User {
        id: "viewer-1".into(),
        name: "Viewer".into(),
        username: "viewer".into(),
        password_hash: swiftmove_api::auth::hash_password("viewer123"),
        role: "Viewer".into(),
    };
    let token = app.auth.generate_token(&viewer).unwrap();

    let (status, _) = app.get("/api/v1/quotes", &token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn health_probes_are_open() {
    let app = TestApp::new().await;

    let (status, body) = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = app.request(Method::GET, "/health/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}
