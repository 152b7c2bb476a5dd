// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth registration callback tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use marathon_tracker::config::Config;
use marathon_tracker::services::StravaClient;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::ScriptedFetcher;

fn callback(query: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(format!("/oauth_callback{}", query))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_callback_with_oauth_error() {
    let (app, _) = common::create_offline_app(Config::test_default());

    let response = app
        .oneshot(callback("?error=access_denied"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_callback_without_code() {
    let (app, _) = common::create_offline_app(Config::test_default());

    let response = app.oneshot(callback("")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_callback_rejected_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad code"))
        .expect(1)
        .mount(&server)
        .await;

    let client = StravaClient::with_base_urls(
        "1234".to_string(),
        "shh".to_string(),
        &server.uri(),
        &format!("{}/oauth", server.uri()),
    );
    let (app, _) = common::create_test_app(
        Config::test_default(),
        client,
        Arc::new(ScriptedFetcher::new()),
    );

    let response = app.oneshot(callback("?code=stale")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_callback_exchanges_code_before_storing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("code=the-code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "abc-123",
            "athlete": { "id": 1234, "firstname": "james", "lastname": "k" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = StravaClient::with_base_urls(
        "1234".to_string(),
        "shh".to_string(),
        &server.uri(),
        &format!("{}/oauth", server.uri()),
    );
    let (app, _) = common::create_test_app(
        Config::test_default(),
        client,
        Arc::new(ScriptedFetcher::new()),
    );

    let response = app
        .oneshot(callback("?code=the-code&scope=read"))
        .await
        .unwrap();

    // The exchange succeeds; storing fails against the offline database.
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
