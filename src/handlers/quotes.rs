//! Quote and schedule endpoints.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::models::Quote;
use crate::services::quotes::{CreateQuoteRequest, UpdateQuoteRequest};
use crate::{ApiResponse, ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct ApproveQuoteRequest {
    #[serde(rename = "finalPrice")]
    pub final_price: Decimal,
}

/// Body for truck assignment. A JSON `null` (or omitted field) unassigns.
#[derive(Debug, Deserialize)]
pub struct AssignTruckRequest {
    #[serde(default, rename = "truckId")]
    pub truck_id: Option<String>,
}

pub async fn list_quotes(State(state): State<AppState>) -> ApiResult<Vec<Quote>> {
    let quotes = state.services.quotes.list_quotes().await?;
    Ok(Json(ApiResponse::success(quotes)))
}

pub async fn get_quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Quote> {
    let quote = state.services.quotes.get_quote(&id).await?;
    Ok(Json(ApiResponse::success(quote)))
}

pub async fn create_quote(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<CreateQuoteRequest>,
) -> ApiResult<Quote> {
    let quote = state
        .services
        .quotes
        .create_quote(request, &user.username)
        .await?;
    Ok(Json(ApiResponse::success(quote)))
}

pub async fn update_quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<UpdateQuoteRequest>,
) -> ApiResult<Quote> {
    let quote = state
        .services
        .quotes
        .update_quote(&id, request, &user.username)
        .await?;
    Ok(Json(ApiResponse::success(quote)))
}

pub async fn approve_quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<ApproveQuoteRequest>,
) -> ApiResult<Quote> {
    let quote = state
        .services
        .quotes
        .approve_quote(&id, request.final_price, &user.username)
        .await?;
    Ok(Json(ApiResponse::success(quote)))
}

pub async fn assign_truck(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<AssignTruckRequest>,
) -> ApiResult<Quote> {
    let quote = state
        .services
        .quotes
        .assign_truck(&id, request.truck_id, &user.username)
        .await?;
    Ok(Json(ApiResponse::success(quote)))
}

pub async fn reschedule_quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<UpdateQuoteRequest>,
) -> ApiResult<Quote> {
    let quote = state
        .services
        .quotes
        .reschedule(&id, request, &user.username)
        .await?;
    Ok(Json(ApiResponse::success(quote)))
}

pub async fn delete_quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<()> {
    state.services.quotes.delete_quote(&id, &user.username).await?;
    Ok(Json(ApiResponse::message("Quote deleted")))
}

pub async fn move_schedule(State(state): State<AppState>) -> ApiResult<Vec<Quote>> {
    let schedule = state.services.quotes.schedule().await?;
    Ok(Json(ApiResponse::success(schedule)))
}
