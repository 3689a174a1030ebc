//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use view_cache::api::create_router;
use view_cache::views::{Avatar, InMemoryDirectory, UserRecord};
use view_cache::{AppState, CacheConfig, ViewCache};

// == Helper Functions ==

fn directory() -> InMemoryDirectory {
    let mut directory = InMemoryDirectory::new();
    directory.insert_user(UserRecord {
        id: "u1".to_string(),
        nickname: "ada".to_string(),
        avatar_id: Some("a1".to_string()),
        updated_at: 1_700_000_000,
    });
    directory.insert_user(UserRecord {
        id: "u2".to_string(),
        nickname: "grace".to_string(),
        avatar_id: None,
        updated_at: 1_700_000_100,
    });
    directory.insert_avatar(Avatar {
        id: "a1".to_string(),
        avatar_url: "https://cdn.example.com/a1.png".to_string(),
    });
    directory
}

fn create_test_state() -> AppState {
    let cache = Arc::new(ViewCache::new(CacheConfig::default()));
    AppState::new(cache, Arc::new(directory()))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// == Profile Endpoint Tests ==

#[tokio::test]
async fn test_profile_endpoint_miss_then_hit() {
    let app = create_router(create_test_state());

    let (status, json) = send(&app, "GET", "/users/u1/profile", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cached"], false);
    assert_eq!(json["user"]["userId"], "u1");
    assert_eq!(json["user"]["nickname"], "ada");
    assert_eq!(json["user"]["avatar"]["avatarUrl"], "https://cdn.example.com/a1.png");

    let (status, json) = send(&app, "GET", "/users/u1/profile", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cached"], true);
}

#[tokio::test]
async fn test_profile_without_avatar() {
    let app = create_router(create_test_state());

    let (status, json) = send(&app, "GET", "/users/u2/profile", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["user"]["avatar"].is_null());
}

#[tokio::test]
async fn test_profile_endpoint_not_found() {
    let app = create_router(create_test_state());

    let (status, json) = send(&app, "GET", "/users/ghost/profile", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("ghost"));
}

// == Invalidation Tests ==

#[tokio::test]
async fn test_invalidate_endpoint() {
    let app = create_router(create_test_state());

    send(&app, "GET", "/users/u1/profile", None).await;

    let (status, json) = send(&app, "DELETE", "/cache/users/u1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], true);
    assert_eq!(json["user_id"], "u1");

    let (_, json) = send(&app, "GET", "/users/u1/profile", None).await;
    assert_eq!(json["cached"], false);
}

#[tokio::test]
async fn test_invalidate_uncached_user() {
    let app = create_router(create_test_state());

    let (status, json) = send(&app, "DELETE", "/cache/users/u2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], false);
}

#[tokio::test]
async fn test_flush_endpoint() {
    let state = create_test_state();
    let cache = state.cache.clone();
    let app = create_router(state);

    send(&app, "GET", "/users/u1/profile", None).await;
    send(&app, "GET", "/users/u2/profile", None).await;
    assert_eq!(cache.len(), 2);

    let (status, json) = send(&app, "DELETE", "/cache", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["flushed"], 2);
    assert!(cache.is_empty());

    let (_, json) = send(&app, "GET", "/users/u1/profile", None).await;
    assert_eq!(json["cached"], false);
}

// == Capacity Tests ==

#[tokio::test]
async fn test_capacity_endpoint() {
    let state = create_test_state();
    let cache = state.cache.clone();
    let app = create_router(state);

    let (status, json) = send(&app, "PUT", "/cache/capacity", Some(r#"{"max_items":500}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["max_items"], 500);
    assert_eq!(cache.max_items(), 500);
}

#[tokio::test]
async fn test_capacity_endpoint_rejects_zero() {
    let app = create_router(create_test_state());

    let (status, json) = send(&app, "PUT", "/cache/capacity", Some(r#"{"max_items":0}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_capacity_shrink_triggers_eviction() {
    let state = create_test_state();
    let cache = state.cache.clone();
    let app = create_router(state);

    for i in 0..40 {
        cache.put(format!("view{i}"), i, None);
    }

    let (status, _) = send(&app, "PUT", "/cache/capacity", Some(r#"{"max_items":20}"#)).await;
    assert_eq!(status, StatusCode::OK);

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert!(cache.len() <= 20, "len {} over new ceiling", cache.len());
}

// == STATS Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint_tracks_hits() {
    let app = create_router(create_test_state());

    send(&app, "GET", "/users/u1/profile", None).await;
    send(&app, "GET", "/users/u1/profile", None).await;
    send(&app, "GET", "/users/u1/profile", None).await;

    let (status, json) = send(&app, "GET", "/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hits"], 2);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["total_entries"], 1);
    assert_eq!(json["max_items"], 100);
    assert!(json.get("hit_rate").is_some());
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_router(create_test_state());

    let (status, json) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}
