//! Query service
//!
//! Use-cases over the query collection. Reads are direct pass-throughs to
//! the repository; the only shaping done here is identifier parsing and the
//! fixed recent-list cap.

use tracing::{info, instrument};

use reco_core::entities::{Query, QueryUpdate};
use reco_core::traits::{parse_object_id, DeleteOutcome, InsertOutcome, UpdateOutcome};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// How many items the recent listing returns
const RECENT_LIMIT: i64 = 6;

/// Query service
pub struct QueryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> QueryService<'a> {
    /// Create a new QueryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Insert a query exactly as supplied
    #[instrument(skip(self, query))]
    pub async fn create(&self, query: Query) -> ServiceResult<InsertOutcome> {
        let outcome = self.ctx.query_repo().create(&query).await?;

        info!(id = %outcome.inserted_id, "Query created");
        Ok(outcome)
    }

    /// List queries for an owner email, newest first; no email lists all
    #[instrument(skip(self))]
    pub async fn list_for_owner(&self, email: Option<&str>) -> ServiceResult<Vec<Query>> {
        Ok(self.ctx.query_repo().list_by_owner(email).await?)
    }

    /// Case-insensitive product-name search, newest first
    #[instrument(skip(self))]
    pub async fn search_by_name(&self, fragment: Option<&str>) -> ServiceResult<Vec<Query>> {
        Ok(self.ctx.query_repo().list_by_name_filter(fragment).await?)
    }

    /// The six newest queries
    #[instrument(skip(self))]
    pub async fn recent(&self) -> ServiceResult<Vec<Query>> {
        Ok(self.ctx.query_repo().list_recent(RECENT_LIMIT).await?)
    }

    /// Every query, oldest first
    #[instrument(skip(self))]
    pub async fn oldest_first(&self) -> ServiceResult<Vec<Query>> {
        Ok(self.ctx.query_repo().list_oldest_first().await?)
    }

    /// Every query, product name ascending
    #[instrument(skip(self))]
    pub async fn by_name_ascending(&self) -> ServiceResult<Vec<Query>> {
        Ok(self.ctx.query_repo().list_by_name_ascending().await?)
    }

    /// Single query by id; `None` when absent
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> ServiceResult<Option<Query>> {
        let id = parse_object_id(id)?;
        Ok(self.ctx.query_repo().find_by_id(id).await?)
    }

    /// Overwrite the six updatable fields, upserting when the id matches
    /// nothing
    #[instrument(skip(self, fields))]
    pub async fn update(&self, id: &str, fields: QueryUpdate) -> ServiceResult<UpdateOutcome> {
        let id = parse_object_id(id)?;
        let outcome = self.ctx.query_repo().update(id, &fields).await?;

        info!(
            %id,
            matched = outcome.matched,
            upserted = outcome.upserted_id.is_some(),
            "Query updated"
        );
        Ok(outcome)
    }

    /// Delete a query by id; a missing document is a no-op
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> ServiceResult<DeleteOutcome> {
        let id = parse_object_id(id)?;
        let outcome = self.ctx.query_repo().delete(id).await?;

        info!(%id, deleted = outcome.deleted, "Query deleted");
        Ok(outcome)
    }
}
