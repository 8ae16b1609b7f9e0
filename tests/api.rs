mod common;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use bookclub::{
    api,
    cache::SessionCache,
    club::BookClub,
    generate::{Backend, FallbackTemplates},
};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app() -> Router {
    let club = BookClub::from_parts(
        common::catalog(&common::dead_url().await),
        common::generator(Backend::Disabled),
        SessionCache::default(),
    )
    .with_templates(FallbackTemplates::new(1));
    api::router(Arc::new(club))
}

async fn call(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_reports_backend() {
    let (status, body) = call(app().await, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["backend"], "none");
    assert_eq!(body["cached"], 0);
}

#[tokio::test]
async fn genres_are_listed() {
    let (status, body) = call(app().await, get("/genres")).await;
    assert_eq!(status, StatusCode::OK);
    let genres = body.as_array().unwrap();
    assert_eq!(genres[0], "Any Genre");
    assert!(genres.contains(&json!("Self-Help")));
}

#[tokio::test]
async fn out_of_range_limit_is_rejected() {
    let (status, _) = call(app().await, get("/books?limit=0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unreachable_catalog_is_an_empty_success() {
    let (status, body) = call(
        app().await,
        get("/books?title=Dune&genre=Science%20Fiction&limit=2"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["query"], r#"title:"Dune" AND subject:"science fiction""#);
}

#[tokio::test]
async fn discuss_generates_for_a_posted_record() {
    let request = Request::builder()
        .method("POST")
        .uri("/discuss")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "title": "Dune", "authors": ["Frank Herbert"], "subjects": ["ecology"] })
                .to_string(),
        ))
        .unwrap();
    let (status, body) = call(app().await, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary_origin"], "template");
    assert_eq!(body["questions"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn discuss_requires_an_author() {
    let request = Request::builder()
        .method("POST")
        .uri("/discuss")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "title": "Dune", "authors": [] }).to_string()))
        .unwrap();
    let (status, _) = call(app().await, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
