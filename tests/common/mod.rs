//! Shared harness for integration tests: an in-memory app with a seeded
//! admin account, driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use swiftmove_api::auth::{AuthConfig, AuthService};
use swiftmove_api::config::AppConfig;
use swiftmove_api::services::AppServices;
use swiftmove_api::store::{MemoryStore, Store};
use swiftmove_api::{router, AppState};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";

pub struct TestApp {
    pub router: Router,
    pub store: Store,
    pub auth: Arc<AuthService>,
}

impl TestApp {
    pub async fn new() -> Self {
        // Every field of AppConfig carries a serde default
        let config: AppConfig =
            serde_json::from_value(json!({})).expect("config defaults deserialize");

        let store = Store::new(Arc::new(MemoryStore::new()));
        let auth = Arc::new(AuthService::new(
            AuthConfig {
                jwt_secret: "integration-test-secret".into(),
                issuer: config.auth_issuer.clone(),
                token_expiry: Duration::from_secs(3600),
            },
            store.clone(),
        ));
        auth.seed_admin("Administrator", ADMIN_USERNAME, ADMIN_PASSWORD)
            .await
            .expect("seed admin");

        let services = AppServices::new(store.clone());
        let state = AppState {
            config,
            store: store.clone(),
            auth: auth.clone(),
            services,
        };

        Self {
            router: router(state),
            store,
            auth,
        }
    }

    pub async fn login(&self) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/v1/auth/login",
                None,
                Some(json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().expect("token in response").to_string()
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("send request");
        let status = response.status();

        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(token), None).await
    }
}
