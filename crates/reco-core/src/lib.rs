//! # reco-core
//!
//! Domain layer containing the document entities, repository traits, and
//! domain errors. This crate has no dependency on the web framework or the
//! database driver beyond the BSON document types themselves.

pub mod entities;
pub mod error;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{Query, QueryUpdate, Recommendation};
pub use error::DomainError;
pub use traits::{
    parse_object_id, CounterSync, DeleteOutcome, InsertOutcome, QueryRepository,
    RecommendationFilter, RecommendationInsert, RecommendationRepository, RepoResult,
    UpdateOutcome,
};
