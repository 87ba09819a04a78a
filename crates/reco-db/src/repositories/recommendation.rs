//! MongoDB implementation of RecommendationRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::{Collection, Database};
use tracing::instrument;

use reco_core::entities::Recommendation;
use reco_core::traits::{RecommendationFilter, RecommendationRepository, RepoResult};

use super::error::map_db_error;
use super::RECOMMENDATIONS_COLLECTION;

/// MongoDB implementation of RecommendationRepository
#[derive(Clone)]
pub struct MongoRecommendationRepository {
    collection: Collection<Recommendation>,
}

impl MongoRecommendationRepository {
    /// Create a new MongoRecommendationRepository
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(RECOMMENDATIONS_COLLECTION),
        }
    }
}

/// Resolve the mutually exclusive list filters.
///
/// The checks run in a fixed order and each present field replaces the
/// filter built so far, so `user_email` wins over `query_id`, which wins
/// over `recommender_email`. Only one field is ever applied.
fn filter_document(filter: &RecommendationFilter) -> Document {
    let mut document = doc! {};

    if let Some(email) = &filter.recommender_email {
        document = doc! { "recommenderEmail": email };
    }
    if let Some(query_id) = &filter.query_id {
        document = doc! { "queryId": query_id };
    }
    if let Some(email) = &filter.user_email {
        document = doc! { "userEmail": email };
    }

    document
}

#[async_trait]
impl RecommendationRepository for MongoRecommendationRepository {
    #[instrument(skip(self))]
    async fn list_filtered(
        &self,
        filter: &RecommendationFilter,
    ) -> RepoResult<Vec<Recommendation>> {
        let mut cursor = self
            .collection
            .find(filter_document(filter))
            .await
            .map_err(map_db_error)?;

        let mut recommendations = Vec::new();
        while let Some(recommendation) = cursor.try_next().await.map_err(map_db_error)? {
            recommendations.push(recommendation);
        }

        Ok(recommendations)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ObjectId) -> RepoResult<Option<Recommendation>> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(map_db_error)
    }
}
