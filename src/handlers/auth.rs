//! Login endpoint.
//!
//! The login response keeps its legacy wire shape (`success`, `token`,
//! embedded `user`) rather than the standard envelope, for compatibility
//! with existing dashboard clients.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::auth::AuthError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub user: LoginUser,
}

#[derive(Debug, Serialize)]
pub struct LoginUser {
    pub name: String,
    pub username: String,
    pub role: String,
}

pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Response {
    if request.username.is_empty() || request.password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "message": "Username and password required" })),
        )
            .into_response();
    }

    match state.auth.login(&request.username, &request.password).await {
        Ok((token, user)) => {
            info!(username = %user.username, "user logged in");
            Json(LoginResponse {
                success: true,
                token,
                user: LoginUser {
                    name: user.name,
                    username: user.username,
                    role: user.role,
                },
            })
            .into_response()
        }
        Err(AuthError::InvalidCredentials) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Invalid credentials" })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
