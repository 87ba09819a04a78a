//! Repository traits (ports) for the data-access layer

mod repositories;

pub use repositories::{
    parse_object_id, CounterSync, DeleteOutcome, InsertOutcome, QueryRepository,
    RecommendationFilter, RecommendationInsert, RecommendationRepository, RepoResult,
    UpdateOutcome,
};
