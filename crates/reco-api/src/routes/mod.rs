//! Route definitions
//!
//! The public paths are flat and exact - existing clients depend on them, so
//! there is no version prefix. Which routes carry a session requirement is
//! part of the same contract: only query creation, the owner-scoped query
//! listing, and the recommendation listing are gated.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{health, queries, recommendations, session};
use crate::state::AppState;

/// Create the main router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(health::liveness))
        .route("/health/ready", get(health::readiness_check))
        .merge(session_routes())
        .merge(query_routes())
        .merge(recommendation_routes())
}

/// Session routes
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/jwt", post(session::issue))
        .route("/logout", post(session::revoke))
}

/// Query routes
fn query_routes() -> Router<AppState> {
    Router::new()
        .route("/queries", post(queries::create_query))
        .route("/queries", get(queries::list_queries))
        .route("/queries-only", get(queries::list_queries_public))
        .route("/queries-six", get(queries::recent_queries))
        .route("/queries-sort", get(queries::oldest_queries))
        .route("/queries-sort-name", get(queries::queries_by_name))
        .route("/queries/:id", get(queries::get_query))
        .route("/queries/:id", put(queries::update_query))
        .route("/queries/:id", delete(queries::delete_query))
}

/// Recommendation routes
fn recommendation_routes() -> Router<AppState> {
    Router::new()
        .route("/recommendations", get(recommendations::list_recommendations))
        .route("/recommendations", post(recommendations::create_recommendation))
        .route("/recommendations/:id", get(recommendations::get_recommendation))
        // Deletion is a POST: the decrement needs the referenced query's id
        // from the body.
        .route("/recommendations/:id", post(recommendations::delete_recommendation))
}
