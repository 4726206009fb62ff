//! Inventory catalog endpoints.

use axum::extract::{Path, State};
use axum::Json;

use crate::models::InventoryItem;
use crate::services::inventory::AddItemRequest;
use crate::{ApiResponse, ApiResult, AppState};

pub async fn list_items(State(state): State<AppState>) -> ApiResult<Vec<InventoryItem>> {
    let items = state.services.inventory.list_items().await?;
    Ok(Json(ApiResponse::success(items)))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<InventoryItem> {
    let item = state.services.inventory.get_item(&id).await?;
    Ok(Json(ApiResponse::success(item)))
}

pub async fn add_item(
    State(state): State<AppState>,
    Json(request): Json<AddItemRequest>,
) -> ApiResult<InventoryItem> {
    let item = state.services.inventory.add_item(request).await?;
    Ok(Json(ApiResponse::success(item)))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.services.inventory.delete_item(&id).await?;
    Ok(Json(ApiResponse::message("Item deleted")))
}
