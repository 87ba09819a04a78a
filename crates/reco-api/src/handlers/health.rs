//! Health check handlers
//!
//! Liveness text and a readiness probe that pings the database.

use axum::{extract::State, http::StatusCode, Json};
use reco_service::ReadinessResponse;

use crate::response::ApiResult;
use crate::state::AppState;

/// Liveness text (also the landing response)
///
/// GET /
pub async fn liveness() -> &'static str {
    "product recommendation server is running"
}

/// Readiness check with database connectivity
///
/// GET /health/ready
pub async fn readiness_check(
    State(state): State<AppState>,
) -> ApiResult<(StatusCode, Json<ReadinessResponse>)> {
    let database = reco_db::ping(state.service_context().database()).await;

    let status = if database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    Ok((status, Json(ReadinessResponse::new(database))))
}
