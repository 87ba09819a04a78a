//! Recommendation service
//!
//! Recommendation reads pass straight through to the repository; creation
//! and deletion go through the counter-synchronized write path so the
//! referenced query's `count` moves with them.

use tracing::{info, instrument, warn};

use reco_core::entities::Recommendation;
use reco_core::error::DomainError;
use reco_core::traits::{
    parse_object_id, DeleteOutcome, RecommendationFilter, RecommendationInsert,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Recommendation service
pub struct RecommendationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RecommendationService<'a> {
    /// Create a new RecommendationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List recommendations per the filter resolution rules
    #[instrument(skip(self))]
    pub async fn list(&self, filter: RecommendationFilter) -> ServiceResult<Vec<Recommendation>> {
        Ok(self.ctx.recommendation_repo().list_filtered(&filter).await?)
    }

    /// Single recommendation by id; `None` when absent
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> ServiceResult<Option<Recommendation>> {
        let id = parse_object_id(id)?;
        Ok(self.ctx.recommendation_repo().find_by_id(id).await?)
    }

    /// Insert a recommendation and increment the referenced query's counter
    #[instrument(skip(self, recommendation))]
    pub async fn create(
        &self,
        recommendation: Recommendation,
    ) -> ServiceResult<RecommendationInsert> {
        let outcome = self
            .ctx
            .counter_sync()
            .create_recommendation(&recommendation)
            .await?;

        if outcome.counter_updated {
            info!(
                id = %outcome.inserted_id,
                query_id = recommendation.query_id.as_deref().unwrap_or("<none>"),
                "Recommendation created"
            );
        } else {
            warn!(
                id = %outcome.inserted_id,
                query_id = recommendation.query_id.as_deref().unwrap_or("<none>"),
                "Recommendation created but the referenced query was not found"
            );
        }

        Ok(outcome)
    }

    /// Decrement the referenced query's counter, then delete the
    /// recommendation
    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        query_id: Option<&str>,
        id: &str,
    ) -> ServiceResult<DeleteOutcome> {
        let query_id = query_id.ok_or(DomainError::MissingQueryId)?;
        let recommendation_id = parse_object_id(id)?;

        let outcome = self
            .ctx
            .counter_sync()
            .delete_recommendation(query_id, recommendation_id)
            .await?;

        info!(
            id = %recommendation_id,
            query_id,
            deleted = outcome.deleted,
            "Recommendation deleted"
        );

        Ok(outcome)
    }
}
