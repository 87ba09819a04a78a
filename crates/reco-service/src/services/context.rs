//! Service context - dependency container for services
//!
//! Holds the repositories and other long-lived dependencies. It is
//! constructed once at process start and injected into every handler via the
//! application state; nothing here lives in module-level statics.

use std::sync::Arc;

use mongodb::Database;
use reco_common::auth::JwtService;
use reco_core::traits::{CounterSync, QueryRepository, RecommendationRepository};

/// Service context containing all dependencies
///
/// Provides access to:
/// - The query and recommendation repositories
/// - The counter-synchronized write path
/// - The JWT service for session tokens
/// - The raw database handle (readiness probe only)
#[derive(Clone)]
pub struct ServiceContext {
    database: Database,
    query_repo: Arc<dyn QueryRepository>,
    recommendation_repo: Arc<dyn RecommendationRepository>,
    counter_sync: Arc<dyn CounterSync>,
    jwt_service: Arc<JwtService>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        database: Database,
        query_repo: Arc<dyn QueryRepository>,
        recommendation_repo: Arc<dyn RecommendationRepository>,
        counter_sync: Arc<dyn CounterSync>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            database,
            query_repo,
            recommendation_repo,
            counter_sync,
            jwt_service,
        }
    }

    /// Get the database handle
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Get the query repository
    pub fn query_repo(&self) -> &dyn QueryRepository {
        self.query_repo.as_ref()
    }

    /// Get the recommendation repository
    pub fn recommendation_repo(&self) -> &dyn RecommendationRepository {
        self.recommendation_repo.as_ref()
    }

    /// Get the counter-synchronized write path
    pub fn counter_sync(&self) -> &dyn CounterSync {
        self.counter_sync.as_ref()
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("database", &self.database.name())
            .finish_non_exhaustive()
    }
}
