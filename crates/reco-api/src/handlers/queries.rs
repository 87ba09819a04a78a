//! Query handlers
//!
//! The listing endpoints differ only in filter and sort order; which of them
//! require a session is part of the public contract (the unauthenticated
//! update/delete/lookup routes are deliberate).

use axum::{
    extract::{Path, Query as QueryString, State},
    Json,
};
use reco_core::entities::Query;
use reco_service::{
    DeleteAckResponse, InsertAckResponse, NameSearchQuery, OwnerListQuery, QueryResponse,
    QueryService, UpdateAckResponse, UpdateQueryRequest,
};

use crate::extractors::AuthIdentity;
use crate::response::ApiResult;
use crate::state::AppState;

fn to_responses(queries: Vec<Query>) -> Vec<QueryResponse> {
    queries.into_iter().map(QueryResponse::from).collect()
}

/// Create a query, stored exactly as supplied
///
/// POST /queries
pub async fn create_query(
    State(state): State<AppState>,
    _identity: AuthIdentity,
    Json(query): Json<Query>,
) -> ApiResult<Json<InsertAckResponse>> {
    let service = QueryService::new(state.service_context());
    let outcome = service.create(query).await?;
    Ok(Json(outcome.into()))
}

/// List queries, optionally filtered by owner email, newest first.
/// The session gates the route; the filter itself comes from the query
/// string.
///
/// GET /queries
pub async fn list_queries(
    State(state): State<AppState>,
    _identity: AuthIdentity,
    QueryString(params): QueryString<OwnerListQuery>,
) -> ApiResult<Json<Vec<QueryResponse>>> {
    let service = QueryService::new(state.service_context());
    let queries = service.list_for_owner(params.email.as_deref()).await?;
    Ok(Json(to_responses(queries)))
}

/// List queries without a session, optionally filtered by a
/// case-insensitive product-name fragment, newest first
///
/// GET /queries-only
pub async fn list_queries_public(
    State(state): State<AppState>,
    QueryString(params): QueryString<NameSearchQuery>,
) -> ApiResult<Json<Vec<QueryResponse>>> {
    let service = QueryService::new(state.service_context());
    let queries = service.search_by_name(params.search.as_deref()).await?;
    Ok(Json(to_responses(queries)))
}

/// The six newest queries
///
/// GET /queries-six
pub async fn recent_queries(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<QueryResponse>>> {
    let service = QueryService::new(state.service_context());
    let queries = service.recent().await?;
    Ok(Json(to_responses(queries)))
}

/// Every query, oldest first
///
/// GET /queries-sort
pub async fn oldest_queries(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<QueryResponse>>> {
    let service = QueryService::new(state.service_context());
    let queries = service.oldest_first().await?;
    Ok(Json(to_responses(queries)))
}

/// Every query, product name ascending
///
/// GET /queries-sort-name
pub async fn queries_by_name(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<QueryResponse>>> {
    let service = QueryService::new(state.service_context());
    let queries = service.by_name_ascending().await?;
    Ok(Json(to_responses(queries)))
}

/// Single query by id. An absent document answers with a JSON `null` body,
/// not an error status; callers treat null as not-found.
///
/// GET /queries/:id
pub async fn get_query(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Option<QueryResponse>>> {
    let service = QueryService::new(state.service_context());
    let query = service.get(&id).await?;
    Ok(Json(query.map(QueryResponse::from)))
}

/// Overwrite the six updatable fields, upserting when the id matches nothing
///
/// PUT /queries/:id
pub async fn update_query(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateQueryRequest>,
) -> ApiResult<Json<UpdateAckResponse>> {
    let service = QueryService::new(state.service_context());
    let outcome = service.update(&id, request.into()).await?;
    Ok(Json(outcome.into()))
}

/// Delete a query; deleting a missing document still acknowledges
///
/// DELETE /queries/:id
pub async fn delete_query(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteAckResponse>> {
    let service = QueryService::new(state.service_context());
    let outcome = service.delete(&id).await?;
    Ok(Json(outcome.into()))
}
