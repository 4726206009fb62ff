//! Dashboard stats endpoint.

use axum::extract::State;
use axum::Json;

use crate::services::stats::{dashboard_stats, DashboardStats};
use crate::{ApiResponse, ApiResult, AppState};

pub async fn get_stats(State(state): State<AppState>) -> ApiResult<DashboardStats> {
    let stats = dashboard_stats(&state.store).await?;
    Ok(Json(ApiResponse::success(stats)))
}
