//! API Integration Tests
//!
//! Each test spawns its own server on the in-memory backend, so no external
//! services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use chrono::{Duration, Utc};
use integration_tests::{assert_json, assert_status, fixtures::*, TestServer};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["storage"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_cast_requires_auth() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .post_anonymous(&upvote_path(&unique_tool()))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "MISSING_AUTHORIZATION");
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .post_auth(&upvote_path(&unique_tool()), "not-a-jwt")
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_invalid_tool_id_rejected() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for(&unique_user()).unwrap();
    let too_long = "t".repeat(200);

    let response = server.post_auth(&upvote_path(&too_long), &token).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_PATH_PARAMETER");
}

// ============================================================================
// Upvote Tests
// ============================================================================

#[tokio::test]
async fn test_cast_and_read_upvote() {
    let server = TestServer::start().await.unwrap();
    let tool = unique_tool();
    let alice = server.token_for(&unique_user()).unwrap();
    let bob = server.token_for(&unique_user()).unwrap();

    let response = server.post_auth(&upvote_path(&tool), &alice).await.unwrap();
    let body: UpvoteBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(
        body,
        UpvoteBody {
            upvote_count: 1,
            user_upvoted: true
        }
    );

    let response = server.post_auth(&upvote_path(&tool), &bob).await.unwrap();
    let body: UpvoteBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.upvote_count, 2);

    // Anonymous readers see the count but never a vote
    let response = server.get(&upvote_path(&tool)).await.unwrap();
    let body: UpvoteBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.upvote_count, 2);
    assert!(!body.user_upvoted);

    let response = server.get_auth(&upvote_path(&tool), &alice).await.unwrap();
    let body: UpvoteBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.user_upvoted);
}

#[tokio::test]
async fn test_second_upvote_same_day_conflicts() {
    let server = TestServer::start().await.unwrap();
    let tool = unique_tool();
    let token = server.token_for(&unique_user()).unwrap();

    server.post_auth(&upvote_path(&tool), &token).await.unwrap();
    let response = server.post_auth(&upvote_path(&tool), &token).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert!(matches!(
        body.error.code.as_str(),
        "ALREADY_VOTED_TODAY" | "DUPLICATE_VOTE"
    ));

    let response = server.get(&upvote_path(&tool)).await.unwrap();
    let body: UpvoteBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.upvote_count, 1);
}

#[tokio::test]
async fn test_daily_limit_across_tools() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for(&unique_user()).unwrap();

    for _ in 0..3 {
        let response = server
            .post_auth(&upvote_path(&unique_tool()), &token)
            .await
            .unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let fourth = unique_tool();
    let response = server.post_auth(&upvote_path(&fourth), &token).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::TOO_MANY_REQUESTS)
        .await
        .unwrap();
    assert_eq!(body.error.code, "DAILY_LIMIT_REACHED");
    assert_eq!(
        body.error.details,
        Some(serde_json::json!({ "limit": 3, "used": 3 }))
    );
    assert!(!body.error.message.is_empty());

    let response = server.get(&upvote_path(&fourth)).await.unwrap();
    let body: UpvoteBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.upvote_count, 0);
}

#[tokio::test]
async fn test_concurrent_casts_respect_cap() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for(&unique_user()).unwrap();
    let paths: Vec<String> = (0..8).map(|_| upvote_path(&unique_tool())).collect();

    let mut handles = Vec::new();
    for path in paths {
        let url = format!("{}{}", server.base_url(), path);
        let client = server.client.clone();
        let token = token.clone();
        handles.push(tokio::spawn(async move {
            client
                .post(&url)
                .bearer_auth(token)
                .send()
                .await
                .map(|r| r.status())
        }));
    }

    let mut accepted = 0;
    for handle in handles {
        let status = handle.await.unwrap().unwrap();
        if status == StatusCode::OK {
            accepted += 1;
        } else {
            assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        }
    }
    assert_eq!(accepted, 3);
}

#[tokio::test]
async fn test_retract_is_idempotent() {
    let server = TestServer::start().await.unwrap();
    let tool = unique_tool();
    let alice = server.token_for(&unique_user()).unwrap();
    let bob = server.token_for(&unique_user()).unwrap();

    server.post_auth(&upvote_path(&tool), &alice).await.unwrap();
    server.post_auth(&upvote_path(&tool), &bob).await.unwrap();

    let response = server.delete_auth(&upvote_path(&tool), &alice).await.unwrap();
    let first: UpvoteBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(
        first,
        UpvoteBody {
            upvote_count: 1,
            user_upvoted: false
        }
    );

    let response = server.delete_auth(&upvote_path(&tool), &alice).await.unwrap();
    let second: UpvoteBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(second, first);
}

#[tokio::test]
async fn test_retract_frees_a_quota_slot() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for(&unique_user()).unwrap();
    let tools: Vec<String> = (0..4).map(|_| unique_tool()).collect();

    for tool in &tools[..3] {
        server.post_auth(&upvote_path(tool), &token).await.unwrap();
    }
    server.delete_auth(&upvote_path(&tools[0]), &token).await.unwrap();

    let response = server.post_auth(&upvote_path(&tools[3]), &token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Quota Tests
// ============================================================================

#[tokio::test]
async fn test_quota_status() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for(&unique_user()).unwrap();
    server
        .post_auth(&upvote_path(&unique_tool()), &token)
        .await
        .unwrap();

    let response = server
        .get_auth("/api/v1/users/@me/upvotes/quota", &token)
        .await
        .unwrap();
    let quota: QuotaBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(quota.limit, 3);
    assert_eq!(quota.used, 1);
    assert_eq!(quota.remaining, 2);
    assert!(quota.daily_reset_at > Utc::now());
    assert!(quota.daily_reset_at <= Utc::now() + Duration::days(1));
    assert!((0..=86_400).contains(&quota.seconds_until_daily_reset));
    assert!(quota.monthly_reset_at > Utc::now().date_naive());
    assert!((1..=31).contains(&quota.days_until_monthly_reset));
}

#[tokio::test]
async fn test_quota_requires_auth() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/users/@me/upvotes/quota").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Favorite Tests
// ============================================================================

#[tokio::test]
async fn test_favorite_toggle() {
    let server = TestServer::start().await.unwrap();
    let tool = unique_tool();
    let token = server.token_for(&unique_user()).unwrap();

    for _ in 0..2 {
        let response = server.post_auth(&favorite_path(&tool), &token).await.unwrap();
        let body: FavoriteBody = assert_json(response, StatusCode::OK).await.unwrap();
        assert!(body.favorited);
    }

    let response = server
        .get_auth("/api/v1/users/@me/favorites", &token)
        .await
        .unwrap();
    let list: FavoriteListBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.favorites.len(), 1);
    assert_eq!(list.favorites[0].tool_id, tool);
    assert!(list.favorites[0].favorited_at <= Utc::now());

    let response = server.delete_auth(&favorite_path(&tool), &token).await.unwrap();
    let body: FavoriteBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!body.favorited);

    let response = server.get_auth(&favorite_path(&tool), &token).await.unwrap();
    let body: FavoriteBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!body.favorited);

    // Unfavoriting again is a no-op, not a 404
    let response = server.delete_auth(&favorite_path(&tool), &token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_favorite_state_anonymous() {
    let server = TestServer::start().await.unwrap();
    let response = server.get(&favorite_path(&unique_tool())).await.unwrap();
    let body: FavoriteBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!body.favorited);
}

// ============================================================================
// Listing Tests
// ============================================================================

#[tokio::test]
async fn test_standings_for_listing_page() {
    let server = TestServer::start().await.unwrap();
    let (a, b, c) = (unique_tool(), unique_tool(), unique_tool());
    let viewer = server.token_for(&unique_user()).unwrap();
    let other = server.token_for(&unique_user()).unwrap();

    server.post_auth(&upvote_path(&b), &viewer).await.unwrap();
    server.post_auth(&upvote_path(&b), &other).await.unwrap();
    server.post_auth(&favorite_path(&c), &viewer).await.unwrap();

    let path = format!("/api/v1/tools/standings?ids={c},{b},{a},{b}");
    let response = server.get_auth(&path, &viewer).await.unwrap();
    let body: StandingsBody = assert_json(response, StatusCode::OK).await.unwrap();

    let rows: Vec<(&str, i64, bool, bool)> = body
        .tools
        .iter()
        .map(|t| (t.tool_id.as_str(), t.upvote_count, t.user_upvoted, t.favorited))
        .collect();
    assert_eq!(
        rows,
        vec![
            (c.as_str(), 0, false, true),
            (b.as_str(), 2, true, false),
            (a.as_str(), 0, false, false),
        ]
    );
}

#[tokio::test]
async fn test_standings_requires_ids() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/tools/standings?ids=,,").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server.get("/api/v1/tools/standings").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_rankings_order() {
    let server = TestServer::start().await.unwrap();
    let users: Vec<String> = (0..3)
        .map(|_| server.token_for(&unique_user()).unwrap())
        .collect();
    let (top, second) = (unique_tool(), unique_tool());

    for token in &users {
        server.post_auth(&upvote_path(&top), token).await.unwrap();
    }
    server.post_auth(&upvote_path(&second), &users[0]).await.unwrap();

    let response = server.get("/api/v1/tools/rankings?limit=2").await.unwrap();
    let body: RankingsBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body.month_start.format("%d").to_string(), "01");
    assert_eq!(body.tools.len(), 2);
    assert_eq!(body.tools[0].rank, 1);
    assert_eq!(body.tools[0].tool_id, top);
    assert_eq!(body.tools[0].upvote_count, 3);
    assert_eq!(body.tools[1].tool_id, second);
    assert_eq!(body.tools[1].upvote_count, 1);
}

// ============================================================================
// Maintenance Tests
// ============================================================================

#[tokio::test]
async fn test_purge_requires_admin_role() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for(&unique_user()).unwrap();

    let response = server
        .post_auth("/api/v1/admin/upvotes/purge", &token)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body.error.code, "INSUFFICIENT_PERMISSIONS");
}

#[tokio::test]
async fn test_purge_keeps_visible_counts() {
    let server = TestServer::start().await.unwrap();
    let tool = unique_tool();
    let voter = server.token_for(&unique_user()).unwrap();
    let admin = server.admin_token(&unique_user()).unwrap();

    server.post_auth(&upvote_path(&tool), &voter).await.unwrap();

    let response = server
        .post_auth("/api/v1/admin/upvotes/purge", &admin)
        .await
        .unwrap();
    let body: PurgeBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.deleted_count, 0);
    assert_eq!(body.current_month_start.format("%d").to_string(), "01");

    let response = server.get(&upvote_path(&tool)).await.unwrap();
    let count: UpvoteBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.upvote_count, 1);
}

#[tokio::test]
async fn test_purge_rejects_future_month() {
    let server = TestServer::start().await.unwrap();
    let admin = server.admin_token(&unique_user()).unwrap();

    let request = PurgeRequestBody {
        as_of: Some(Utc::now() + Duration::days(40)),
    };
    let response = server
        .post_json_auth("/api/v1/admin/upvotes/purge", &admin, &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_purge_with_past_as_of() {
    let server = TestServer::start().await.unwrap();
    let admin = server.admin_token(&unique_user()).unwrap();

    let request = PurgeRequestBody {
        as_of: Some(Utc::now() - Duration::days(400)),
    };
    let response = server
        .post_json_auth("/api/v1/admin/upvotes/purge", &admin, &request)
        .await
        .unwrap();
    let body: PurgeBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.deleted_count, 0);
    assert!(body.current_month_start < Utc::now().date_naive());
}
