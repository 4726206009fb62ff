//! Activity feed endpoints.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::models::ActivityEntry;
use crate::services::activity::DEFAULT_ACTIVITY_LIMIT;
use crate::{ApiResponse, ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

pub async fn recent_activity(
    State(state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> ApiResult<Vec<ActivityEntry>> {
    let limit = query.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT);
    let entries = state.services.activity.recent(limit).await?;
    Ok(Json(ApiResponse::success(entries)))
}

pub async fn clear_activity(State(state): State<AppState>) -> ApiResult<()> {
    state.services.activity.clear().await?;
    Ok(Json(ApiResponse::message("Activity log cleared")))
}
