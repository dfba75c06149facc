//! The local development router drives the same handler as Lambda.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use std::sync::Arc;
use tower::ServiceExt;
use visitor_counter::create_router;

mod common;

use common::{counting_handler, test_handler, UnreachableStore, TEST_ORIGIN};

async fn body_text(response: axum::response::Response) -> String {
    // ---
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

fn request(method: &str, uri: &str) -> Request<Body> {
    // ---
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn get_visitor_counts() {
    // ---
    let (handler, _store) = counting_handler(41);
    let app = create_router(handler);

    let response = app.clone().oneshot(request("GET", "/visitor")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/json");
    assert_eq!(response.headers()["access-control-allow-origin"], TEST_ORIGIN);
    assert_eq!(response.headers()["access-control-allow-headers"], "Content-Type");
    assert_eq!(
        response.headers()["access-control-allow-methods"],
        "OPTIONS,POST,GET"
    );
    assert_eq!(body_text(response).await, "\"42\"");

    let response = app.oneshot(request("GET", "/visitor")).await.unwrap();
    assert_eq!(body_text(response).await, "\"43\"");
}

#[tokio::test]
async fn query_string_does_not_affect_route() {
    // ---
    let (handler, _store) = counting_handler(0);
    let app = create_router(handler);

    let response = app.oneshot(request("GET", "/visitor?ref=home")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "\"1\"");
}

#[tokio::test]
async fn other_routes_return_handler_404() {
    // ---
    let (handler, store) = counting_handler(0);
    let app = create_router(handler);

    for (method, uri) in [("POST", "/visitor"), ("GET", "/"), ("PUT", "/nonexistent")] {
        let response = app.clone().oneshot(request(method, uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method} {uri}");
        assert_eq!(response.headers()["access-control-allow-origin"], TEST_ORIGIN);
        assert_eq!(body_text(response).await, "\"404 not found\"");
    }

    assert_eq!(store.increments(), 0);
}

#[tokio::test]
async fn store_failure_returns_400() {
    // ---
    let app = create_router(test_handler(Arc::new(UnreachableStore)));

    let response = app.oneshot(request("GET", "/visitor")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "\"Error processing request\"");
}

#[tokio::test]
async fn metrics_endpoint_with_noop() {
    // ---
    let (handler, _store) = counting_handler(0);
    let app = create_router(handler);

    let response = app.oneshot(request("GET", "/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "text/plain; version=0.0.4; charset=utf-8"
    );
    assert!(body_text(response).await.is_empty());
}

#[tokio::test]
async fn other_methods_on_metrics_path_reach_handler() {
    // ---
    let (handler, store) = counting_handler(0);
    let app = create_router(handler);

    for method in ["POST", "PUT", "DELETE"] {
        let response = app.clone().oneshot(request(method, "/metrics")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method} /metrics");
        assert_eq!(response.headers()["access-control-allow-origin"], TEST_ORIGIN);
        assert_eq!(response.headers()["content-type"], "application/json");
        assert_eq!(body_text(response).await, "\"404 not found\"");
    }

    assert_eq!(store.increments(), 0);
}
