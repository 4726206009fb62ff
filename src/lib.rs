//! SwiftMove back-office API.
//!
//! Staff-facing service for a moving company: quote lifecycle, move
//! schedule, insurance claims, fleet and inventory management, an activity
//! feed, and derived dashboard statistics, all behind JWT authentication
//! with an Admin role gate. Persistence goes through the [`store`]
//! capability trait so backends stay interchangeable.

pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::routing::{get, post, put};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::auth::{AuthRouterExt, AuthService, ADMIN_ROLE};
use crate::config::AppConfig;
use crate::errors::ServiceError;
use crate::services::AppServices;
use crate::store::Store;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Store,
    pub auth: Arc<AuthService>,
    pub services: AppServices,
}

/// Standard response envelope for the versioned API.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ServiceError>;

/// Everything except login requires a valid token with the Admin role.
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/quotes",
            get(handlers::quotes::list_quotes).post(handlers::quotes::create_quote),
        )
        .route(
            "/quotes/:id",
            get(handlers::quotes::get_quote)
                .put(handlers::quotes::update_quote)
                .delete(handlers::quotes::delete_quote),
        )
        .route("/quotes/:id/approve", post(handlers::quotes::approve_quote))
        .route("/quotes/:id/truck", put(handlers::quotes::assign_truck))
        .route(
            "/quotes/:id/schedule",
            put(handlers::quotes::reschedule_quote),
        )
        .route("/schedule", get(handlers::quotes::move_schedule))
        .route(
            "/claims",
            get(handlers::claims::list_claims).post(handlers::claims::file_claim),
        )
        .route(
            "/claims/:id",
            get(handlers::claims::get_claim)
                .put(handlers::claims::process_claim)
                .delete(handlers::claims::delete_claim),
        )
        .route(
            "/trucks",
            get(handlers::trucks::list_trucks).post(handlers::trucks::add_truck),
        )
        .route(
            "/trucks/:id",
            get(handlers::trucks::get_truck)
                .put(handlers::trucks::update_truck)
                .delete(handlers::trucks::delete_truck),
        )
        .route(
            "/inventory",
            get(handlers::inventory::list_items).post(handlers::inventory::add_item),
        )
        .route(
            "/inventory/:id",
            get(handlers::inventory::get_item).delete(handlers::inventory::delete_item),
        )
        .route(
            "/activities",
            get(handlers::activities::recent_activity)
                .delete(handlers::activities::clear_activity),
        )
        .route("/stats", get(handlers::stats::get_stats))
        .route("/estimate", post(handlers::estimator::post_estimate))
        .with_role(ADMIN_ROLE)
}

pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .merge(admin_routes())
}

fn build_cors(config: &AppConfig) -> CorsLayer {
    if config.cors_allow_any_origin {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }
    if config.cors_allowed_origins.is_empty() {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn router(state: AppState) -> Router {
    let cors = build_cors(&state.config);
    let auth = state.auth.clone();

    Router::new()
        .nest("/api/v1", api_v1_routes())
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness_check))
        .layer(Extension(auth))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(cors)
        .with_state(state)
}
