//! HTTP API tests driven through the router without a live socket.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use influmatch::models::{Candidate, Platform};
use influmatch::services::MatchService;
use influmatch::storage::InMemoryStore;
use std::sync::Arc;
use tower::ServiceExt;

fn test_router() -> Router {
    let store = Arc::new(InMemoryStore::with_candidates(
        Platform::Facebook,
        vec![
            Candidate::new("1", Some("Aligned"), vec![1.0, 0.0, 0.0]),
            Candidate::new("2", Some("Orthogonal"), vec![0.0, 1.0, 0.0]),
            Candidate::new("3", Some("Opposite"), vec![-1.0, 0.0, 0.0]),
        ],
    ));
    influmatch::http::router(Arc::new(MatchService::new(store)))
}

fn match_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/match")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn match_returns_ranked_results() {
    let response = test_router()
        .oneshot(match_request(
            r#"{"target_vector": [1.0, 0.0, 0.0], "weights": [1.0, 1.0, 1.0], "top_k": 2}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let results = json.as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["id"], "1");
    assert_eq!(results[0]["name"], "Aligned");
    assert!((results[0]["score"].as_f64().unwrap() - 1.0).abs() < 1e-6);
    assert_eq!(results[1]["id"], "2");
}

#[tokio::test]
async fn match_defaults_top_k_to_five() {
    let response = test_router()
        .oneshot(match_request(
            r#"{"target_vector": [1.0, 0.0, 0.0], "weights": [1.0, 1.0, 1.0]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    // All three candidates fit under the default limit of 5.
    assert_eq!(json.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn match_rejects_dimension_mismatch_with_400() {
    let response = test_router()
        .oneshot(match_request(
            r#"{"target_vector": [1.0, 2.0, 3.0], "weights": [1.0, 1.0]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .contains("dimension mismatch")
    );
}

#[tokio::test]
async fn match_rejects_unknown_platform() {
    let response = test_router()
        .oneshot(match_request(
            r#"{"target_vector": [1.0], "weights": [1.0], "platform": "myspace"}"#,
        ))
        .await
        .unwrap();

    // Typed boundary: serde rejects the selector before the core runs.
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn match_on_empty_platform_returns_empty_list() {
    let response = test_router()
        .oneshot(match_request(
            r#"{"target_vector": [1.0], "weights": [1.0], "platform": "youtube"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn health_endpoint_responds() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn responses_carry_nosniff_header() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get(header::X_CONTENT_TYPE_OPTIONS).unwrap(),
        "nosniff"
    );
}
