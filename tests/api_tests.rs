use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use opera::opera::api::Api;
use opera::opera::discovery::MockDiscovery;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

fn api() -> Api {
    Api::new(Arc::new(MockDiscovery::new(vec![])), 10, CancellationToken::new())
}

#[tokio::test]
async fn create_agent_without_api_key_is_rejected() {
    let response = api()
        .router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/agents")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from("model=gpt-4.1&system-prompt=be+helpful"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_agent_with_key_and_model_succeeds() {
    let response = api()
        .router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/agents")
                .header("content-type", "application/x-www-form-urlencoded")
                .header("X-Api-Key", "sk-test")
                .body(Body::from("model=gpt-4.1&system-prompt=be+helpful"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.headers().contains_key("location"));
}

#[tokio::test]
async fn query_agent_with_empty_text_is_rejected() {
    let app = api();
    let created = app
        .router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/agents")
                .header("content-type", "application/x-www-form-urlencoded")
                .header("X-Api-Key", "sk-test")
                .body(Body::from("model=gpt-4.1&system-prompt=be+helpful"))
                .unwrap(),
        )
        .await
        .unwrap();
    let body = axum::body::to_bytes(created.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let id = json["id"].as_str().unwrap().to_string();

    let response = app
        .router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/v1/agents/{}", id))
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from("text="))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn query_agent_with_bad_id_is_rejected_before_lookup() {
    let response = api()
        .router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/agents/not-a-valid-id-at-all")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from("text=hi"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_missing_agent_is_bad_request() {
    let response = api()
        .router()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/v1/agents/age-doesnotexist")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_then_delete_agent_succeeds() {
    let app = api();
    let created = app
        .router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/agents")
                .header("content-type", "application/x-www-form-urlencoded")
                .header("X-Api-Key", "sk-test")
                .body(Body::from("model=gpt-4.1&system-prompt=be+helpful"))
                .unwrap(),
        )
        .await
        .unwrap();
    let body = axum::body::to_bytes(created.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let id = json["id"].as_str().unwrap().to_string();

    let response = app
        .router()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/v1/agents/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
