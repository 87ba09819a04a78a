//! # reco-db
//!
//! Database layer implementing the repository traits from `reco-core`
//! against MongoDB.
//!
//! ## Overview
//!
//! - Client construction with optional credential injection into the URI
//! - Typed collection handles (entities serialize straight to BSON)
//! - Repository implementations, including the transactional
//!   counter-synchronized writes

pub mod client;
pub mod repositories;

// Re-export commonly used types
pub use client::{connect, effective_uri, ping, ConnectError};
pub use repositories::{MongoCounterSync, MongoQueryRepository, MongoRecommendationRepository};
