//! Data transfer objects for API requests and responses
//!
//! Request DTOs deserialize the wire shapes the original clients send
//! (camelCase keys where the stored documents use them); response DTOs
//! mirror the MongoDB driver acknowledgment shapes those clients expect.

pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    DeleteRecommendationRequest, NameSearchQuery, OwnerListQuery, RecommendationListQuery,
    UpdateQueryRequest,
};

// Re-export commonly used response types
pub use responses::{
    DeleteAckResponse, InsertAckResponse, QueryResponse, ReadinessResponse,
    RecommendationCreatedResponse, RecommendationResponse, SessionResponse, UpdateAckResponse,
};
