// Copyright 2025 Strand Contributors (https://github.com/strandhq/strand)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! End-to-end tests over the assembled router, no socket required.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use strand_server::{api::AppState, build_router, service::StringService};
use strand_storage::MemoryStore;

fn app() -> Router {
    let state = AppState {
        service: Arc::new(StringService::new(Arc::new(MemoryStore::new()))),
    };
    build_router(state, false)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn create_returns_full_entry() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json("/api/v1/strings", json!({"value": "Race car"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["value"], "Race car");
    assert_eq!(body["properties"]["length"], 8);
    assert_eq!(body["properties"]["is_palindrome"], true);
    assert_eq!(body["properties"]["word_count"], 2);
    assert_eq!(body["properties"]["unique_characters"], 6);
    assert_eq!(body["id"], body["properties"]["sha256_hash"]);
    assert!(body["created_at"].as_str().unwrap().contains('T'));
}

#[tokio::test]
async fn create_rejects_bad_bodies() {
    let app = app();

    let (status, _) = send(&app, post_json("/api/v1/strings", json!({"value": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, post_json("/api/v1/strings", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, post_json("/api/v1/strings", json!({"value": 42}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("must be a string"));
}

#[tokio::test]
async fn duplicate_create_is_a_conflict() {
    let app = app();
    let (status, _) = send(
        &app,
        post_json("/api/v1/strings", json!({"value": "twice"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        post_json("/api/v1/strings", json!({"value": "twice"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn get_by_value_round_trips() {
    let app = app();
    let (_, created) = send(
        &app,
        post_json("/api/v1/strings", json!({"value": "kayak"})),
    )
    .await;

    let (status, fetched) = send(&app, get("/api/v1/strings/kayak")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, _) = send(&app, get("/api/v1/strings/missing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn filter_by_criteria_applies_only_set_fields() {
    let app = app();
    for value in ["racecar", "anna", "not a palindrome"] {
        let (status, _) = send(&app, post_json("/api/v1/strings", json!({"value": value}))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, get("/api/v1/strings?is_palindrome=true&min_length=5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["matches"][0]["value"], "racecar");
    assert_eq!(
        body["applied_filters"],
        json!({"is_palindrome": true, "min_length": 5})
    );
    assert!(body.get("interpreted_query").is_none());
}

#[tokio::test]
async fn contradictory_bounds_are_rejected_up_front() {
    let app = app();
    let (status, body) = send(&app, get("/api/v1/strings?min_length=5&max_length=3")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("min_length"));
}

#[tokio::test]
async fn unparseable_filter_values_are_rejected() {
    let app = app();

    let (status, _) = send(&app, get("/api/v1/strings?min_length=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, get("/api/v1/strings?min_length=-1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, get("/api/v1/strings?contains_character=ab")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn natural_language_search_end_to_end() {
    let app = app();
    for value in ["racecar", "abc", "deed poll"] {
        send(&app, post_json("/api/v1/strings", json!({"value": value}))).await;
    }

    let (status, body) = send(
        &app,
        post_json(
            "/api/v1/search",
            json!({"query": "find palindromic single word strings longer than 3 characters"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["matches"][0]["value"], "racecar");
    assert_eq!(
        body["applied_filters"],
        json!({"is_palindrome": true, "min_length": 4, "word_count": 1})
    );
    let parsed = body["interpreted_query"]["parsed_filters"].as_object().unwrap();
    assert_eq!(parsed.len(), 3);
    assert_eq!(
        body["interpreted_query"]["original"],
        "find palindromic single word strings longer than 3 characters"
    );
}

#[tokio::test]
async fn unrecognized_search_is_a_bad_request() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json("/api/v1/search", json!({"query": "show me everything"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("no recognized"));
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let app = app();
    send(
        &app,
        post_json("/api/v1/strings", json!({"value": "short lived"})),
    )
    .await;

    let (status, body) = send(&app, delete("/api/v1/strings/short%20lived")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, get("/api/v1/strings/short%20lived")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, delete("/api/v1/strings/short%20lived")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_entry_count() {
    let app = app();
    send(&app, post_json("/api/v1/strings", json!({"value": "one"}))).await;

    let (status, body) = send(&app, get("/api/v1/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["entries"], 1);
}
