//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; the infrastructure layer
//! provides the MongoDB implementation.

use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::entities::{Query, QueryUpdate, Recommendation};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Parse a caller-supplied identifier into the store's id type
pub fn parse_object_id(id: &str) -> Result<ObjectId, DomainError> {
    ObjectId::parse_str(id).map_err(|_| DomainError::InvalidId(id.to_string()))
}

/// Acknowledgment of a single-document insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertOutcome {
    pub inserted_id: ObjectId,
}

/// Acknowledgment of a single-document update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
    /// Present only when the update upserted a new document.
    pub upserted_id: Option<ObjectId>,
}

/// Acknowledgment of a single-document delete; `deleted` is zero when no
/// document matched (deleting a missing document is not an error).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub deleted: u64,
}

/// Outcome of a counter-synchronized recommendation insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationInsert {
    pub inserted_id: ObjectId,
    /// Whether the referenced query's counter actually moved. False when the
    /// referenced query no longer exists - the insert still commits.
    pub counter_updated: bool,
}

/// Filter options for listing recommendations.
///
/// The filters are mutually exclusive and resolved in a fixed order:
/// `recommender_email`, then `query_id`, then `user_email`. Each later check
/// overwrites the filter chosen by an earlier one, so when several are
/// supplied only the last-checked field is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationFilter {
    pub recommender_email: Option<String>,
    pub query_id: Option<String>,
    pub user_email: Option<String>,
}

// ============================================================================
// Query Repository
// ============================================================================

#[async_trait]
pub trait QueryRepository: Send + Sync {
    /// Insert a query document exactly as supplied
    async fn create(&self, query: &Query) -> RepoResult<InsertOutcome>;

    /// All queries for an owner email, newest first; no email lists everything
    async fn list_by_owner(&self, email: Option<&str>) -> RepoResult<Vec<Query>>;

    /// Case-insensitive substring match on product name, newest first;
    /// an empty or absent fragment lists everything
    async fn list_by_name_filter(&self, fragment: Option<&str>) -> RepoResult<Vec<Query>>;

    /// The `limit` newest queries
    async fn list_recent(&self, limit: i64) -> RepoResult<Vec<Query>>;

    /// Full scan, oldest first
    async fn list_oldest_first(&self) -> RepoResult<Vec<Query>>;

    /// Full scan, product name ascending
    async fn list_by_name_ascending(&self) -> RepoResult<Vec<Query>>;

    /// Find a query by id; `None` when absent
    async fn find_by_id(&self, id: ObjectId) -> RepoResult<Option<Query>>;

    /// Overwrite the six updatable fields, upserting when no document matches
    async fn update(&self, id: ObjectId, fields: &QueryUpdate) -> RepoResult<UpdateOutcome>;

    /// Delete a query by id; a missing document is a no-op
    async fn delete(&self, id: ObjectId) -> RepoResult<DeleteOutcome>;
}

// ============================================================================
// Recommendation Repository
// ============================================================================

/// Read side of the recommendation collection. Inserts and deletes move the
/// referenced query's counter with them, so they live on [`CounterSync`]
/// instead.
#[async_trait]
pub trait RecommendationRepository: Send + Sync {
    /// List recommendations per the filter resolution rules
    async fn list_filtered(&self, filter: &RecommendationFilter) -> RepoResult<Vec<Recommendation>>;

    /// Find a recommendation by id; `None` when absent
    async fn find_by_id(&self, id: ObjectId) -> RepoResult<Option<Recommendation>>;
}

// ============================================================================
// Counter Synchronization
// ============================================================================

/// Writes that keep `count` on a query aligned with the recommendations
/// referencing it. Both operations run inside a single transactional
/// boundary so the pair either commits together or not at all.
#[async_trait]
pub trait CounterSync: Send + Sync {
    /// Insert the recommendation and increment the referenced query's counter
    async fn create_recommendation(
        &self,
        recommendation: &Recommendation,
    ) -> RepoResult<RecommendationInsert>;

    /// Decrement the referenced query's counter, then delete the
    /// recommendation
    async fn delete_recommendation(
        &self,
        query_id: &str,
        recommendation_id: ObjectId,
    ) -> RepoResult<DeleteOutcome>;
}
