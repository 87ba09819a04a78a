//! Counter-synchronized recommendation writes
//!
//! A recommendation insert or delete must move the referenced query's
//! `count` with it. The two single-document writes live in different
//! collections, so they run inside one client-session transaction: the pair
//! commits together or not at all. This requires a replica-set (or mongos)
//! deployment, which is what the service targets.

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::{Client, ClientSession, Collection, Database};
use tracing::instrument;

use reco_core::entities::{Query, Recommendation};
use reco_core::error::DomainError;
use reco_core::traits::{CounterSync, DeleteOutcome, RecommendationInsert, RepoResult};

use super::error::{map_db_error, parse_object_id};
use super::{QUERIES_COLLECTION, RECOMMENDATIONS_COLLECTION};

/// MongoDB implementation of CounterSync
#[derive(Clone)]
pub struct MongoCounterSync {
    client: Client,
    queries: Collection<Query>,
    recommendations: Collection<Recommendation>,
}

impl MongoCounterSync {
    /// Create a new MongoCounterSync over both collections
    pub fn new(client: Client, database: &Database) -> Self {
        Self {
            client,
            queries: database.collection(QUERIES_COLLECTION),
            recommendations: database.collection(RECOMMENDATIONS_COLLECTION),
        }
    }

    async fn start_transaction(&self) -> RepoResult<ClientSession> {
        let mut session = self.client.start_session().await.map_err(map_db_error)?;
        session.start_transaction().await.map_err(map_db_error)?;
        Ok(session)
    }

    async fn insert_and_increment(
        &self,
        session: &mut ClientSession,
        recommendation: &Recommendation,
        query_id: ObjectId,
    ) -> RepoResult<RecommendationInsert> {
        let insert = self
            .recommendations
            .insert_one(recommendation)
            .session(&mut *session)
            .await
            .map_err(map_db_error)?;

        let inserted_id = insert.inserted_id.as_object_id().ok_or_else(|| {
            DomainError::InternalError("insert did not return an ObjectId".to_string())
        })?;

        // A well-formed reference to a since-deleted query matches nothing;
        // the insert still commits and the caller learns the counter did not
        // move.
        let update = self
            .queries
            .update_one(doc! { "_id": query_id }, doc! { "$inc": { "count": 1 } })
            .session(session)
            .await
            .map_err(map_db_error)?;

        Ok(RecommendationInsert {
            inserted_id,
            counter_updated: update.modified_count > 0,
        })
    }

    async fn decrement_and_delete(
        &self,
        session: &mut ClientSession,
        query_id: ObjectId,
        recommendation_id: ObjectId,
    ) -> RepoResult<DeleteOutcome> {
        // Decrement first, then delete; the transaction makes the order a
        // matter of log readability rather than correctness.
        self.queries
            .update_one(doc! { "_id": query_id }, doc! { "$inc": { "count": -1 } })
            .session(&mut *session)
            .await
            .map_err(map_db_error)?;

        let delete = self
            .recommendations
            .delete_one(doc! { "_id": recommendation_id })
            .session(session)
            .await
            .map_err(map_db_error)?;

        Ok(DeleteOutcome {
            deleted: delete.deleted_count,
        })
    }
}

#[async_trait]
impl CounterSync for MongoCounterSync {
    #[instrument(skip(self, recommendation))]
    async fn create_recommendation(
        &self,
        recommendation: &Recommendation,
    ) -> RepoResult<RecommendationInsert> {
        let query_id = recommendation
            .query_id
            .as_deref()
            .ok_or(DomainError::MissingQueryId)?;
        let query_id = parse_object_id(query_id)?;

        let mut session = self.start_transaction().await?;

        match self
            .insert_and_increment(&mut session, recommendation, query_id)
            .await
        {
            Ok(outcome) => {
                session.commit_transaction().await.map_err(map_db_error)?;
                Ok(outcome)
            }
            Err(err) => {
                session.abort_transaction().await.ok();
                Err(err)
            }
        }
    }

    #[instrument(skip(self))]
    async fn delete_recommendation(
        &self,
        query_id: &str,
        recommendation_id: ObjectId,
    ) -> RepoResult<DeleteOutcome> {
        let query_id = parse_object_id(query_id)?;

        let mut session = self.start_transaction().await?;

        match self
            .decrement_and_delete(&mut session, query_id, recommendation_id)
            .await
        {
            Ok(outcome) => {
                session.commit_transaction().await.map_err(map_db_error)?;
                Ok(outcome)
            }
            Err(err) => {
                session.abort_transaction().await.ok();
                Err(err)
            }
        }
    }
}
