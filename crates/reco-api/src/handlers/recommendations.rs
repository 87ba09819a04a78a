//! Recommendation handlers
//!
//! Creation and deletion both go through the counter-synchronized write
//! path; deletion arrives as a POST because its body carries the referenced
//! query's id alongside the path parameter.

use axum::{
    extract::{Path, Query as QueryString, State},
    Json,
};
use reco_service::{
    DeleteAckResponse, DeleteRecommendationRequest, RecommendationCreatedResponse,
    RecommendationListQuery, RecommendationResponse, RecommendationService,
};

use reco_core::entities::Recommendation;

use crate::extractors::AuthIdentity;
use crate::response::ApiResult;
use crate::state::AppState;

/// List recommendations. The three filters are mutually exclusive; when
/// several are supplied, `userEmail` wins over `queryId`, which wins over
/// `recommenderEmail`.
///
/// GET /recommendations
pub async fn list_recommendations(
    State(state): State<AppState>,
    _identity: AuthIdentity,
    QueryString(params): QueryString<RecommendationListQuery>,
) -> ApiResult<Json<Vec<RecommendationResponse>>> {
    let service = RecommendationService::new(state.service_context());
    let recommendations = service.list(params.into()).await?;
    Ok(Json(
        recommendations
            .into_iter()
            .map(RecommendationResponse::from)
            .collect(),
    ))
}

/// Single recommendation by id; JSON `null` body when absent
///
/// GET /recommendations/:id
pub async fn get_recommendation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Option<RecommendationResponse>>> {
    let service = RecommendationService::new(state.service_context());
    let recommendation = service.get(&id).await?;
    Ok(Json(recommendation.map(RecommendationResponse::from)))
}

/// Create a recommendation and increment the referenced query's counter
///
/// POST /recommendations
pub async fn create_recommendation(
    State(state): State<AppState>,
    Json(recommendation): Json<Recommendation>,
) -> ApiResult<Json<RecommendationCreatedResponse>> {
    let service = RecommendationService::new(state.service_context());
    let outcome = service.create(recommendation).await?;
    Ok(Json(outcome.into()))
}

/// Decrement the referenced query's counter, then delete the recommendation
///
/// POST /recommendations/:id
pub async fn delete_recommendation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<DeleteRecommendationRequest>>,
) -> ApiResult<Json<DeleteAckResponse>> {
    let query_id = body.and_then(|b| b.0.query_id);

    let service = RecommendationService::new(state.service_context());
    let outcome = service.delete(query_id.as_deref(), &id).await?;
    Ok(Json(outcome.into()))
}
