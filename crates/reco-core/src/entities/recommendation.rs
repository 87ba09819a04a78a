//! Recommendation entity - one user's recommendation against a query

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A recommendation document.
///
/// `query_id` holds the referenced query's identifier in string form; it is
/// converted to an `ObjectId` only at the store boundary. The reference is
/// weak: deleting a query does not delete its recommendations, and deleting
/// the last recommendation does not delete the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Store-assigned identifier; absent until inserted.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// String form of the referenced query's identifier.
    #[serde(rename = "queryId", skip_serializing_if = "Option::is_none")]
    pub query_id: Option<String>,

    /// Email of the user posting this recommendation.
    #[serde(rename = "recommenderEmail", skip_serializing_if = "Option::is_none")]
    pub recommender_email: Option<String>,

    /// Email of the user who owns the referenced query.
    #[serde(rename = "userEmail", skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,

    /// Free-form recommendation content (title, product, image, text, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
