//! Error handling utilities for repositories

use mongodb::error::Error as MongoError;
use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};

use reco_core::error::DomainError;
use reco_core::traits::{DeleteOutcome, InsertOutcome, UpdateOutcome};

pub use reco_core::traits::parse_object_id;

/// Convert a driver error to a DomainError
pub fn map_db_error(e: MongoError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Extract the insert acknowledgment from a driver result
pub fn insert_outcome(result: InsertOneResult) -> Result<InsertOutcome, DomainError> {
    let inserted_id = result
        .inserted_id
        .as_object_id()
        .ok_or_else(|| DomainError::InternalError("insert did not return an ObjectId".to_string()))?;
    Ok(InsertOutcome { inserted_id })
}

/// Extract the update acknowledgment from a driver result
pub fn update_outcome(result: UpdateResult) -> UpdateOutcome {
    UpdateOutcome {
        matched: result.matched_count,
        modified: result.modified_count,
        upserted_id: result.upserted_id.and_then(|id| id.as_object_id()),
    }
}

/// Extract the delete acknowledgment from a driver result
pub fn delete_outcome(result: DeleteResult) -> DeleteOutcome {
    DeleteOutcome {
        deleted: result.deleted_count,
    }
}
