//! Fleet endpoints.

use axum::extract::{Path, State};
use axum::{Extension, Json};

use crate::auth::AuthUser;
use crate::models::Truck;
use crate::services::trucks::{AddTruckRequest, UpdateTruckRequest};
use crate::{ApiResponse, ApiResult, AppState};

pub async fn list_trucks(State(state): State<AppState>) -> ApiResult<Vec<Truck>> {
    let trucks = state.services.trucks.list_trucks().await?;
    Ok(Json(ApiResponse::success(trucks)))
}

pub async fn get_truck(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Truck> {
    let truck = state.services.trucks.get_truck(&id).await?;
    Ok(Json(ApiResponse::success(truck)))
}

pub async fn add_truck(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<AddTruckRequest>,
) -> ApiResult<Truck> {
    let truck = state
        .services
        .trucks
        .add_truck(request, &user.username)
        .await?;
    Ok(Json(ApiResponse::success(truck)))
}

pub async fn update_truck(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<UpdateTruckRequest>,
) -> ApiResult<Truck> {
    let truck = state
        .services
        .trucks
        .update_truck(&id, request, &user.username)
        .await?;
    Ok(Json(ApiResponse::success(truck)))
}

pub async fn delete_truck(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<()> {
    state.services.trucks.delete_truck(&id, &user.username).await?;
    Ok(Json(ApiResponse::message("Truck removed")))
}
