//! API Integration Tests
//!
//! These tests require:
//! - A reachable MongoDB deployment that supports transactions (replica set)
//! - Environment variables: MONGODB_URI, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reco_common::auth::JwtService;
use reqwest::StatusCode;

// ============================================================================
// Liveness & Readiness
// ============================================================================

#[tokio::test]
async fn test_liveness_text() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/").await.expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert_eq!(body, "product recommendation server is running");
}

#[tokio::test]
async fn test_readiness() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Session Tests
// ============================================================================

#[tokio::test]
async fn test_issue_session_sets_cookie() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.session_client().unwrap();

    let response = server.login(&client, "alice@example.com").await.unwrap();
    let ack: SessionAck = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(ack.success);
    assert!(!ack.token.unwrap().is_empty());

    // The cookie now in the client's jar opens the gated listing
    let response = server.get_with(&client, "/queries").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_gated_route_without_cookie_is_unauthorized() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/queries").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server.get("/recommendations").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_forbidden() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let forged = JwtService::new("not-the-server-secret", 3600)
        .sign(
            serde_json::json!({ "email": "mallory@example.com" })
                .as_object()
                .unwrap(),
        )
        .unwrap();

    let url = format!("{}/queries", server.base_url());
    let response = server
        .client
        .get(&url)
        .header("Cookie", format!("token={forged}"))
        .send()
        .await
        .unwrap();

    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_expired_token_is_forbidden() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Same secret as the server, but already past expiry (and leeway)
    let secret = std::env::var("JWT_SECRET").unwrap();
    let expired = JwtService::new(&secret, -120)
        .sign(
            serde_json::json!({ "email": "alice@example.com" })
                .as_object()
                .unwrap(),
        )
        .unwrap();

    let url = format!("{}/queries", server.base_url());
    let response = server
        .client
        .get(&url)
        .header("Cookie", format!("token={expired}"))
        .send()
        .await
        .unwrap();

    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_logout_clears_session() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.session_client().unwrap();

    server.login(&client, "alice@example.com").await.unwrap();
    let response = server.get_with(&client, "/queries").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.post_with(&client, "/logout", &()).await.unwrap();
    let ack: SessionAck = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(ack.success);

    let response = server.get_with(&client, "/queries").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Query Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_query() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.session_client().unwrap();
    server.login(&client, "alice@example.com").await.unwrap();

    let doc = QueryDoc::unique();
    let response = server.post_with(&client, "/queries", &doc).await.unwrap();
    let ack: InsertAck = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(ack.acknowledged);

    // Lookup by id is public
    let response = server.get(&format!("/queries/{}", ack.inserted_id)).await.unwrap();
    let fetched: Option<QueryResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let fetched = fetched.expect("created query should be found");

    assert_eq!(fetched.id, ack.inserted_id);
    assert_eq!(fetched.product_name, Some(doc.product_name));
    assert_eq!(fetched.email, Some(doc.email));
    assert_eq!(fetched.count(), 0);
}

#[tokio::test]
async fn test_get_absent_query_answers_null() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let id = bson::oid::ObjectId::new().to_hex();
    let response = server.get(&format!("/queries/{id}")).await.unwrap();
    let fetched: Option<QueryResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(fetched.is_none());
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/queries/not-a-hex-id").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_owner_listing_filters_by_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.session_client().unwrap();
    server.login(&client, "alice@example.com").await.unwrap();

    let doc = QueryDoc::unique();
    let owner = doc.email.clone();
    server.post_with(&client, "/queries", &doc).await.unwrap();

    let response = server
        .get_with(&client, &format!("/queries?email={owner}"))
        .await
        .unwrap();
    let queries: Vec<QueryResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(!queries.is_empty());
    assert!(queries.iter().all(|q| q.email.as_deref() == Some(owner.as_str())));
}

#[tokio::test]
async fn test_recent_listing_caps_at_six_newest_first() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.session_client().unwrap();
    server.login(&client, "alice@example.com").await.unwrap();

    for age in 0..7i64 {
        let doc = QueryDoc::unique().aged(age);
        server.post_with(&client, "/queries", &doc).await.unwrap();
    }

    let response = server.get("/queries-six").await.unwrap();
    let queries: Vec<QueryResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(queries.len() <= 6);
    let times: Vec<_> = queries.iter().filter_map(|q| q.time).collect();
    assert!(times.windows(2).all(|w| w[0] >= w[1]), "not sorted newest first");
}

#[tokio::test]
async fn test_oldest_first_listing_is_ascending() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.session_client().unwrap();
    server.login(&client, "alice@example.com").await.unwrap();

    for age in 0..3i64 {
        let doc = QueryDoc::unique().aged(age * 10);
        server.post_with(&client, "/queries", &doc).await.unwrap();
    }

    let response = server.get("/queries-sort").await.unwrap();
    let queries: Vec<QueryResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    let times: Vec<_> = queries.iter().filter_map(|q| q.time).collect();
    assert!(times.windows(2).all(|w| w[0] <= w[1]), "not sorted oldest first");
}

#[tokio::test]
async fn test_name_search_is_case_insensitive() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.session_client().unwrap();
    server.login(&client, "alice@example.com").await.unwrap();

    // A fragment nothing else in the collection will contain
    let fragment = format!("shoe-{}", unique_suffix());

    let matching = [
        QueryDoc::named(&format!("Running {}", fragment.to_uppercase())),
        QueryDoc::named(&format!("{fragment} rack")),
    ];
    let mut matching_ids = Vec::new();
    for doc in &matching {
        let response = server.post_with(&client, "/queries", doc).await.unwrap();
        let ack: InsertAck = assert_json(response, StatusCode::OK).await.unwrap();
        matching_ids.push(ack.inserted_id);
    }

    let shirt = QueryDoc::named(&format!("Shirt {}", unique_suffix()));
    let response = server.post_with(&client, "/queries", &shirt).await.unwrap();
    let shirt_ack: InsertAck = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .get(&format!("/queries-only?search={fragment}"))
        .await
        .unwrap();
    let queries: Vec<QueryResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    let ids: Vec<_> = queries.iter().map(|q| q.id.clone()).collect();
    for id in &matching_ids {
        assert!(ids.contains(id), "case-insensitive match missing");
    }
    assert!(!ids.contains(&shirt_ack.inserted_id));
}

#[tokio::test]
async fn test_update_overwrites_six_fields_and_leaves_the_rest() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.session_client().unwrap();
    server.login(&client, "alice@example.com").await.unwrap();

    let doc = QueryDoc::unique();
    let owner = doc.email.clone();
    let response = server.post_with(&client, "/queries", &doc).await.unwrap();
    let ack: InsertAck = assert_json(response, StatusCode::OK).await.unwrap();

    let update = serde_json::json!({
        "product_name": "Renamed Product",
        "product_brand": "Renamed Brand",
        "product_image": "https://example.com/new.png",
        "query_title": "Renamed title",
        "reason": "Renamed reason",
        "current_time": chrono::Utc::now(),
    });
    let response = server
        .put(&format!("/queries/{}", ack.inserted_id), &update)
        .await
        .unwrap();
    let updated: UpdateAck = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.matched_count, 1);
    assert!(updated.upserted_id.is_none());

    let response = server.get(&format!("/queries/{}", ack.inserted_id)).await.unwrap();
    let fetched: Option<QueryResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let fetched = fetched.unwrap();

    assert_eq!(fetched.product_name.as_deref(), Some("Renamed Product"));
    assert!(fetched.last_updated_at.is_some());
    // Fields outside the six are untouched
    assert_eq!(fetched.email, Some(owner));
    assert_eq!(fetched.count(), 0);
}

#[tokio::test]
async fn test_update_on_missing_id_upserts_partial_document() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let id = bson::oid::ObjectId::new().to_hex();
    let update = serde_json::json!({
        "product_name": "Ghost Product",
        "current_time": chrono::Utc::now(),
    });
    let response = server.put(&format!("/queries/{id}"), &update).await.unwrap();
    let updated: UpdateAck = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(updated.matched_count, 0);
    assert_eq!(updated.upserted_id.as_deref(), Some(id.as_str()));

    // The upserted document carries only the six updatable fields
    let response = server.get(&format!("/queries/{id}")).await.unwrap();
    let fetched: Option<QueryResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let fetched = fetched.unwrap();

    assert_eq!(fetched.product_name.as_deref(), Some("Ghost Product"));
    assert!(fetched.email.is_none());
    assert!(fetched.time.is_none());
    assert!(fetched.count.is_none());

    // Cleanup
    server.delete(&format!("/queries/{id}")).await.unwrap();
}

#[tokio::test]
async fn test_delete_query_is_idempotent() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.session_client().unwrap();
    server.login(&client, "alice@example.com").await.unwrap();

    let response = server.post_with(&client, "/queries", &QueryDoc::unique()).await.unwrap();
    let ack: InsertAck = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server.delete(&format!("/queries/{}", ack.inserted_id)).await.unwrap();
    let deleted: DeleteAck = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(deleted.deleted_count, 1);

    // Deleting again still acknowledges, with nothing removed
    let response = server.delete(&format!("/queries/{}", ack.inserted_id)).await.unwrap();
    let deleted: DeleteAck = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(deleted.deleted_count, 0);
}

// ============================================================================
// Recommendation & Counter Tests
// ============================================================================

#[tokio::test]
async fn test_recommendation_create_increments_counter() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.session_client().unwrap();
    server.login(&client, "alice@example.com").await.unwrap();

    let doc = QueryDoc::unique();
    let owner = doc.email.clone();
    let response = server.post_with(&client, "/queries", &doc).await.unwrap();
    let query: InsertAck = assert_json(response, StatusCode::OK).await.unwrap();

    let rec = RecommendationDoc::for_query(&query.inserted_id, &owner);
    let response = server.post("/recommendations", &rec).await.unwrap();
    let created: RecommendationCreatedAck = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(created.acknowledged);
    assert!(created.counter_updated);

    let response = server.get(&format!("/queries/{}", query.inserted_id)).await.unwrap();
    let fetched: Option<QueryResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.unwrap().count(), 1);
}

#[tokio::test]
async fn test_recommendation_delete_decrements_counter_and_removes() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.session_client().unwrap();
    server.login(&client, "alice@example.com").await.unwrap();

    let doc = QueryDoc::unique();
    let owner = doc.email.clone();
    let response = server.post_with(&client, "/queries", &doc).await.unwrap();
    let query: InsertAck = assert_json(response, StatusCode::OK).await.unwrap();

    let rec = RecommendationDoc::for_query(&query.inserted_id, &owner);
    let response = server.post("/recommendations", &rec).await.unwrap();
    let created: RecommendationCreatedAck = assert_json(response, StatusCode::OK).await.unwrap();

    // Decrement-then-delete rides a POST carrying the referenced query id
    let body = serde_json::json!({ "query_id": query.inserted_id });
    let response = server
        .post(&format!("/recommendations/{}", created.inserted_id), &body)
        .await
        .unwrap();
    let deleted: DeleteAck = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(deleted.deleted_count, 1);

    let response = server.get(&format!("/queries/{}", query.inserted_id)).await.unwrap();
    let fetched: Option<QueryResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.unwrap().count(), 0);

    let response = server
        .get(&format!("/recommendations/{}", created.inserted_id))
        .await
        .unwrap();
    let gone: Option<RecommendationResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(gone.is_none());
}

#[tokio::test]
async fn test_recommendation_for_unknown_query_commits_without_counter() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let ghost_query = bson::oid::ObjectId::new().to_hex();
    let rec = RecommendationDoc::for_query(&ghost_query, "nobody@example.com");
    let response = server.post("/recommendations", &rec).await.unwrap();
    let created: RecommendationCreatedAck = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(created.acknowledged);
    assert!(!created.counter_updated);
}

#[tokio::test]
async fn test_recommendation_filters_override_in_fixed_order() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.session_client().unwrap();
    server.login(&client, "alice@example.com").await.unwrap();

    let doc = QueryDoc::unique();
    let owner = doc.email.clone();
    let response = server.post_with(&client, "/queries", &doc).await.unwrap();
    let query: InsertAck = assert_json(response, StatusCode::OK).await.unwrap();

    let rec = RecommendationDoc::for_query(&query.inserted_id, &owner);
    let recommender = rec.recommender_email.clone();
    server.post("/recommendations", &rec).await.unwrap();

    // Both filters supplied: only queryId applies, so a bogus recommender
    // email must not exclude the row.
    let path = format!(
        "/recommendations?recommenderEmail=nobody@example.com&queryId={}",
        query.inserted_id
    );
    let response = server.get_with(&client, &path).await.unwrap();
    let listed: Vec<RecommendationResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].recommender_email, Some(recommender));
    assert_eq!(listed[0].query_id.as_deref(), Some(query.inserted_id.as_str()));
}
