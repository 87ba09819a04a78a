//! Response DTOs for API endpoints
//!
//! Document responses serialize ObjectIds as plain hex strings under `_id`,
//! and write acknowledgments mirror the driver result shapes
//! (`insertedId`, `matchedCount`, `deletedCount`, ...) the original clients
//! already parse.

use chrono::{DateTime, Utc};
use serde::Serialize;

use reco_core::entities::{Query, Recommendation};
use reco_core::traits::{DeleteOutcome, InsertOutcome, RecommendationInsert, UpdateOutcome};

// ============================================================================
// Document Responses
// ============================================================================

/// A query document on the wire
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    #[serde(rename = "lastUpdatedAt", skip_serializing_if = "Option::is_none")]
    pub last_updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl From<Query> for QueryResponse {
    fn from(query: Query) -> Self {
        Self {
            id: query.id.map(|id| id.to_hex()).unwrap_or_default(),
            email: query.email,
            product_name: query.product_name,
            product_brand: query.product_brand,
            product_image: query.product_image,
            query_title: query.query_title,
            reason: query.reason,
            time: query.time,
            last_updated_at: query.last_updated_at,
            count: query.count,
            extra: query.extra,
        }
    }
}

/// A recommendation document on the wire
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "queryId", skip_serializing_if = "Option::is_none")]
    pub query_id: Option<String>,
    #[serde(rename = "recommenderEmail", skip_serializing_if = "Option::is_none")]
    pub recommender_email: Option<String>,
    #[serde(rename = "userEmail", skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl From<Recommendation> for RecommendationResponse {
    fn from(recommendation: Recommendation) -> Self {
        Self {
            id: recommendation.id.map(|id| id.to_hex()).unwrap_or_default(),
            query_id: recommendation.query_id,
            recommender_email: recommendation.recommender_email,
            user_email: recommendation.user_email,
            extra: recommendation.extra,
        }
    }
}

// ============================================================================
// Write Acknowledgments
// ============================================================================

/// Insert acknowledgment
#[derive(Debug, Serialize)]
pub struct InsertAckResponse {
    pub acknowledged: bool,
    #[serde(rename = "insertedId")]
    pub inserted_id: String,
}

impl From<InsertOutcome> for InsertAckResponse {
    fn from(outcome: InsertOutcome) -> Self {
        Self {
            acknowledged: true,
            inserted_id: outcome.inserted_id.to_hex(),
        }
    }
}

/// Insert acknowledgment for a counter-synchronized recommendation create;
/// also reports whether the referenced query's counter moved
#[derive(Debug, Serialize)]
pub struct RecommendationCreatedResponse {
    pub acknowledged: bool,
    #[serde(rename = "insertedId")]
    pub inserted_id: String,
    #[serde(rename = "counterUpdated")]
    pub counter_updated: bool,
}

impl From<RecommendationInsert> for RecommendationCreatedResponse {
    fn from(outcome: RecommendationInsert) -> Self {
        Self {
            acknowledged: true,
            inserted_id: outcome.inserted_id.to_hex(),
            counter_updated: outcome.counter_updated,
        }
    }
}

/// Update acknowledgment
#[derive(Debug, Serialize)]
pub struct UpdateAckResponse {
    pub acknowledged: bool,
    #[serde(rename = "matchedCount")]
    pub matched_count: u64,
    #[serde(rename = "modifiedCount")]
    pub modified_count: u64,
    #[serde(rename = "upsertedId", skip_serializing_if = "Option::is_none")]
    pub upserted_id: Option<String>,
}

impl From<UpdateOutcome> for UpdateAckResponse {
    fn from(outcome: UpdateOutcome) -> Self {
        Self {
            acknowledged: true,
            matched_count: outcome.matched,
            modified_count: outcome.modified,
            upserted_id: outcome.upserted_id.map(|id| id.to_hex()),
        }
    }
}

/// Delete acknowledgment
#[derive(Debug, Serialize)]
pub struct DeleteAckResponse {
    pub acknowledged: bool,
    #[serde(rename = "deletedCount")]
    pub deleted_count: u64,
}

impl From<DeleteOutcome> for DeleteAckResponse {
    fn from(outcome: DeleteOutcome) -> Self {
        Self {
            acknowledged: true,
            deleted_count: outcome.deleted,
        }
    }
}

// ============================================================================
// Session & Health Responses
// ============================================================================

/// Session acknowledgment; carries the raw token when one was issued
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl SessionResponse {
    /// Acknowledge an issued session, returning the raw token too
    #[must_use]
    pub fn issued(token: String) -> Self {
        Self {
            success: true,
            token: Some(token),
        }
    }

    /// Acknowledge a cleared session
    #[must_use]
    pub fn revoked() -> Self {
        Self {
            success: true,
            token: None,
        }
    }
}

/// Readiness probe response
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub database: bool,
}

impl ReadinessResponse {
    #[must_use]
    pub fn new(database: bool) -> Self {
        Self {
            ready: database,
            database,
        }
    }
}
