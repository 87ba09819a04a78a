//! Request DTOs for API endpoints
//!
//! There is deliberately no validation layer: absent fields stay absent all
//! the way to the store.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use reco_core::entities::QueryUpdate;
use reco_core::traits::RecommendationFilter;

/// Body of a query update.
///
/// Exactly the six updatable fields; everything else in the body is ignored.
/// The timestamp arrives under `current_time` (the key the original clients
/// send) and is stored as `lastUpdatedAt`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateQueryRequest {
    pub product_name: Option<String>,
    pub product_brand: Option<String>,
    pub product_image: Option<String>,
    pub query_title: Option<String>,
    pub reason: Option<String>,
    pub current_time: Option<DateTime<Utc>>,
}

impl From<UpdateQueryRequest> for QueryUpdate {
    fn from(request: UpdateQueryRequest) -> Self {
        Self {
            product_name: request.product_name,
            product_brand: request.product_brand,
            product_image: request.product_image,
            query_title: request.query_title,
            reason: request.reason,
            last_updated_at: request.current_time,
        }
    }
}

/// Body of the decrement-then-delete call; carries the referenced query's id
/// under the snake-cased key the original clients send here (creation uses
/// `queryId`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteRecommendationRequest {
    pub query_id: Option<String>,
}

/// Query string of the owner-scoped query listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwnerListQuery {
    pub email: Option<String>,
}

/// Query string of the public name-filtered listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NameSearchQuery {
    pub search: Option<String>,
}

/// Query string of the recommendation listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationListQuery {
    #[serde(rename = "recommenderEmail")]
    pub recommender_email: Option<String>,
    #[serde(rename = "queryId")]
    pub query_id: Option<String>,
    #[serde(rename = "userEmail")]
    pub user_email: Option<String>,
}

impl From<RecommendationListQuery> for RecommendationFilter {
    fn from(query: RecommendationListQuery) -> Self {
        Self {
            recommender_email: query.recommender_email,
            query_id: query.query_id,
            user_email: query.user_email,
        }
    }
}
