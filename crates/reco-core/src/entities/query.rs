//! Query entity - a product a user wants recommendations for

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product query document.
///
/// Every client-supplied field is optional: documents are stored exactly as
/// submitted, with absent fields left absent rather than rejected or
/// defaulted. Unknown fields round-trip through `extra`.
///
/// `count` is the denormalized number of live recommendations referencing
/// this query. It is mutated only through counter-synchronized writes, never
/// set directly by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Store-assigned identifier; absent until inserted.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Email of the owner who posted the query.
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

    /// Creation timestamp; the sort key for every time-ordered listing.
    /// Stored as an RFC 3339 string, which sorts chronologically.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,

    #[serde(rename = "lastUpdatedAt", skip_serializing_if = "Option::is_none")]
    pub last_updated_at: Option<DateTime<Utc>>,

    /// Live recommendation count; absent means zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,

    /// Any fields the client sent that the schema does not name.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Query {
    /// The recommendation count, treating an absent field as zero.
    #[must_use]
    pub fn count(&self) -> i64 {
        self.count.unwrap_or(0)
    }
}

/// The exact set of fields an update overwrites.
///
/// An update writes all six keys, substituting null for anything the caller
/// omitted, and upserts when no document matches - the upserted document
/// then contains only these six fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryUpdate {
    pub product_name: Option<String>,
    pub product_brand: Option<String>,
    pub product_image: Option<String>,
    pub query_title: Option<String>,
    pub reason: Option<String>,
    pub last_updated_at: Option<DateTime<Utc>>,
}
