//! Router test fixtures

use std::sync::Arc;

use arena_core::bootstrap::init_services;
use arena_core::Config;
use arena_livekit::ApiCredentials;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::http::{create_router, AppState};

pub const API_KEY: &str = "APItestkey";
pub const API_SECRET: &str = "router-test-secret-value";

pub fn test_credentials() -> ApiCredentials {
    ApiCredentials::new(API_KEY, API_SECRET)
}

pub fn router_for(config: Config) -> Router {
    let services = init_services(&config).unwrap();
    create_router(AppState::new(Arc::new(config), services))
}

pub fn unconfigured_router() -> Router {
    router_for(Config::default())
}

/// Router with credentials, and a room service if `livekit_url` is set
pub fn configured_router(livekit_url: Option<&str>) -> Router {
    let mut config = Config::default();
    config.livekit.url = livekit_url.map(str::to_string);
    config.livekit.api_key = Some(API_KEY.to_string());
    config.livekit.api_secret = Some(API_SECRET.to_string());
    router_for(config)
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

pub async fn get_text(router: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, body) = send(router, request).await;
    (status, String::from_utf8(body).unwrap())
}

pub async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get_text(router, uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

pub async fn post_raw(router: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, body) = send(router, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

pub async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(router, uri, &body.to_string()).await
}
