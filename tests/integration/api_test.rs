// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{amazon_results_page, block_everything, mount_page, MockMarketplaces};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use priceradar::presentation::routes;
use serde_json::Value;
use tower::util::ServiceExt;

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// 健康检查测试
///
/// 验证健康检查端点是否正常工作
#[tokio::test]
async fn test_health_check_works() {
    let markets = MockMarketplaces::start().await;
    let (status, body) = get(routes::routes(markets.engine()), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_index_describes_endpoints() {
    let markets = MockMarketplaces::start().await;
    let (status, body) = get(routes::routes(markets.engine()), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["endpoints"]["health"], "/health");
}

#[tokio::test]
async fn test_missing_query_is_rejected() {
    let markets = MockMarketplaces::start().await;

    for uri in ["/api/search", "/api/search?query=", "/api/search?query=%20%20"] {
        let (status, body) = get(routes::routes(markets.engine()), uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"], "Query parameter is required");
        assert_eq!(body["example"], "/api/search?query=iPhone+15");
    }
}

#[tokio::test]
async fn test_single_character_query_is_rejected() {
    let markets = MockMarketplaces::start().await;
    let (status, body) = get(routes::routes(markets.engine()), "/api/search?query=a").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Query must be at least 2 characters long");
    assert!(body.get("example").is_none());
}

#[tokio::test]
async fn test_unknown_route_lists_endpoints() {
    let markets = MockMarketplaces::start().await;
    let (status, body) = get(routes::routes(markets.engine()), "/api/unknown").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Endpoint not found");
    assert_eq!(body["availableEndpoints"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_search_returns_ranked_result_shape() {
    let markets = MockMarketplaces::start().await;
    mount_page(&markets.amazon, "/s", None, 200, &amazon_results_page(), 1).await;
    mount_page(&markets.flipkart, "/search", None, 200, "<html><body></body></html>", 1).await;

    let (status, body) = get(routes::routes(markets.engine()), "/api/search?query=iPhone+15").await;

    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().unwrap();
    assert!(!results.is_empty());

    for key in [
        "id",
        "platform",
        "platformLogo",
        "title",
        "price",
        "deliveryTime",
        "url",
        "isLowestPrice",
        "isPlaceholder",
    ] {
        assert!(results[0].get(key).is_some(), "missing {}", key);
    }
    assert_eq!(results[0]["id"], "1");
    assert_eq!(results[0]["isLowestPrice"], true);
}

#[tokio::test]
async fn test_search_never_returns_empty_list() {
    let markets = MockMarketplaces::start().await;
    block_everything(&markets).await;

    let (status, body) = get(routes::routes(markets.engine()), "/api/search?query=headphones").await;

    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|r| r["isPlaceholder"] == true));
}
