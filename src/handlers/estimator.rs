//! Cost estimate endpoint.

use axum::Json;

use crate::services::estimator::{estimate, Estimate, EstimateRequest};
use crate::{ApiResponse, ApiResult};

pub async fn post_estimate(Json(request): Json<EstimateRequest>) -> ApiResult<Estimate> {
    let estimate = estimate(&request)?;
    Ok(Json(ApiResponse::success(estimate)))
}
