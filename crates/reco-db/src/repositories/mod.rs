//! Repository implementations
//!
//! MongoDB implementations of the repository traits defined in reco-core.
//! Entities serialize directly to BSON, so there is no separate row-model
//! layer.

mod counter;
mod error;
mod query;
mod recommendation;

pub use counter::MongoCounterSync;
pub use query::MongoQueryRepository;
pub use recommendation::MongoRecommendationRepository;

/// Collection holding query documents
pub const QUERIES_COLLECTION: &str = "queries";

/// Collection holding recommendation documents (singular, matching the
/// deployed data)
pub const RECOMMENDATIONS_COLLECTION: &str = "recommendation";
