//! Claim endpoints.

use axum::extract::{Path, State};
use axum::{Extension, Json};

use crate::auth::AuthUser;
use crate::models::Claim;
use crate::services::claims::{FileClaimRequest, ProcessClaimRequest};
use crate::{ApiResponse, ApiResult, AppState};

pub async fn list_claims(State(state): State<AppState>) -> ApiResult<Vec<Claim>> {
    let claims = state.services.claims.list_claims().await?;
    Ok(Json(ApiResponse::success(claims)))
}

pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Claim> {
    let claim = state.services.claims.get_claim(&id).await?;
    Ok(Json(ApiResponse::success(claim)))
}

pub async fn file_claim(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<FileClaimRequest>,
) -> ApiResult<Claim> {
    let claim = state
        .services
        .claims
        .file_claim(request, &user.username)
        .await?;
    Ok(Json(ApiResponse::success(claim)))
}

pub async fn process_claim(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<ProcessClaimRequest>,
) -> ApiResult<Claim> {
    let claim = state
        .services
        .claims
        .process_claim(&id, request, &user.username)
        .await?;
    Ok(Json(ApiResponse::success(claim)))
}

pub async fn delete_claim(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<()> {
    state.services.claims.delete_claim(&id, &user.username).await?;
    Ok(Json(ApiResponse::message("Claim deleted")))
}
