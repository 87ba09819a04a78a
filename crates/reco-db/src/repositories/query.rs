//! MongoDB implementation of QueryRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, to_bson, Bson, Document};
use mongodb::options::{FindOptions, UpdateOptions};
use mongodb::{Collection, Database};
use tracing::instrument;

use reco_core::entities::{Query, QueryUpdate};
use reco_core::error::DomainError;
use reco_core::traits::{
    DeleteOutcome, InsertOutcome, QueryRepository, RepoResult, UpdateOutcome,
};

use super::error::{delete_outcome, insert_outcome, map_db_error, update_outcome};
use super::QUERIES_COLLECTION;

/// MongoDB implementation of QueryRepository
#[derive(Clone)]
pub struct MongoQueryRepository {
    collection: Collection<Query>,
}

impl MongoQueryRepository {
    /// Create a new MongoQueryRepository
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(QUERIES_COLLECTION),
        }
    }

    /// Run a find and drain the cursor
    async fn find_all(&self, filter: Document, options: FindOptions) -> RepoResult<Vec<Query>> {
        let mut cursor = self
            .collection
            .find(filter)
            .with_options(options)
            .await
            .map_err(map_db_error)?;

        let mut queries = Vec::new();
        while let Some(query) = cursor.try_next().await.map_err(map_db_error)? {
            queries.push(query);
        }

        Ok(queries)
    }
}

/// Filter matching a single owner email; empty filter when no email is given
fn owner_filter(email: Option<&str>) -> Document {
    match email {
        Some(email) => doc! { "email": email },
        None => doc! {},
    }
}

/// Case-insensitive substring filter on the product name; an empty fragment
/// matches everything
fn name_filter(fragment: Option<&str>) -> Document {
    match fragment {
        Some(fragment) if !fragment.is_empty() => doc! {
            "product_name": { "$regex": fragment, "$options": "i" }
        },
        _ => doc! {},
    }
}

/// `$set` document writing all six updatable fields, null for omitted ones.
/// An upsert therefore creates a document containing exactly these fields.
fn update_document(fields: &QueryUpdate) -> RepoResult<Document> {
    let set = doc! {
        "product_name": field_bson(&fields.product_name)?,
        "product_brand": field_bson(&fields.product_brand)?,
        "product_image": field_bson(&fields.product_image)?,
        "query_title": field_bson(&fields.query_title)?,
        "reason": field_bson(&fields.reason)?,
        "lastUpdatedAt": field_bson(&fields.last_updated_at)?,
    };
    Ok(doc! { "$set": set })
}

fn field_bson<T: serde::Serialize>(value: &T) -> RepoResult<Bson> {
    to_bson(value).map_err(|e| DomainError::InternalError(e.to_string()))
}

#[async_trait]
impl QueryRepository for MongoQueryRepository {
    #[instrument(skip(self, query))]
    async fn create(&self, query: &Query) -> RepoResult<InsertOutcome> {
        let result = self
            .collection
            .insert_one(query)
            .await
            .map_err(map_db_error)?;

        insert_outcome(result)
    }

    #[instrument(skip(self))]
    async fn list_by_owner(&self, email: Option<&str>) -> RepoResult<Vec<Query>> {
        let options = FindOptions::builder().sort(doc! { "time": -1 }).build();
        self.find_all(owner_filter(email), options).await
    }

    #[instrument(skip(self))]
    async fn list_by_name_filter(&self, fragment: Option<&str>) -> RepoResult<Vec<Query>> {
        let options = FindOptions::builder().sort(doc! { "time": -1 }).build();
        self.find_all(name_filter(fragment), options).await
    }

    #[instrument(skip(self))]
    async fn list_recent(&self, limit: i64) -> RepoResult<Vec<Query>> {
        let options = FindOptions::builder()
            .sort(doc! { "time": -1 })
            .limit(limit)
            .build();
        self.find_all(doc! {}, options).await
    }

    #[instrument(skip(self))]
    async fn list_oldest_first(&self) -> RepoResult<Vec<Query>> {
        let options = FindOptions::builder().sort(doc! { "time": 1 }).build();
        self.find_all(doc! {}, options).await
    }

    #[instrument(skip(self))]
    async fn list_by_name_ascending(&self) -> RepoResult<Vec<Query>> {
        let options = FindOptions::builder()
            .sort(doc! { "product_name": 1 })
            .build();
        self.find_all(doc! {}, options).await
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ObjectId) -> RepoResult<Option<Query>> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, fields))]
    async fn update(&self, id: ObjectId, fields: &QueryUpdate) -> RepoResult<UpdateOutcome> {
        let options = UpdateOptions::builder().upsert(true).build();

        let result = self
            .collection
            .update_one(doc! { "_id": id }, update_document(fields)?)
            .with_options(options)
            .await
            .map_err(map_db_error)?;

        Ok(update_outcome(result))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> RepoResult<DeleteOutcome> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id })
            .await
            .map_err(map_db_error)?;

        Ok(delete_outcome(result))
    }
}
