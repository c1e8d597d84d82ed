//! End-to-end tests for the HTTP API.
//!
//! Requests are driven through the full router (middleware included) with
//! `tower::ServiceExt::oneshot` against an in-memory repository.

#![cfg(feature = "http-server")]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use dog_api::db::repositories::LocalRepository;
use dog_api::db::repository::DogRepository;
use dog_api::http::{create_router, AppState};
use dog_api::models::NewDog;

fn test_app() -> (Router, LocalRepository) {
    let repo = LocalRepository::new();
    let state = AppState::new(Arc::new(repo.clone()) as Arc<dyn DogRepository>);
    (create_router(state), repo)
}

fn rex() -> Value {
    json!({
        "name": "Rex",
        "breed": "Lab",
        "description": "Friendly",
        "age": 3
    })
}

fn seed(repo: &LocalRepository, name: &str) -> i32 {
    repo.insert_dog_impl(NewDog {
        name: name.to_string(),
        breed: "Beagle".to_string(),
        description: "Loves walks".to_string(),
        age: 5,
    })
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    send_request(app, request).await
}

async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

// =============================================================================
// Service endpoints
// =============================================================================

#[tokio::test]
async fn test_root_greets() {
    let (app, _) = test_app();
    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Hello World!" }));
}

#[tokio::test]
async fn test_health_reports_database_state() {
    let (app, repo) = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");

    repo.set_healthy(false);
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "disconnected");
}

#[tokio::test]
async fn test_unknown_route() {
    let (app, _) = test_app();
    let (status, body) = send(&app, Method::GET, "/cats", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Route not found" }));
}

// =============================================================================
// GET /dogs
// =============================================================================

#[tokio::test]
async fn test_list_empty() {
    let (app, _) = test_app();
    let (status, body) = send(&app, Method::GET, "/dogs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_in_id_order() {
    let (app, repo) = test_app();
    seed(&repo, "Alpha");
    seed(&repo, "Bravo");
    seed(&repo, "Charlie");

    let (status, body) = send(&app, Method::GET, "/dogs", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|dog| dog["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(body[1]["name"], "Bravo");
}

#[tokio::test]
async fn test_list_store_failure() {
    let (app, repo) = test_app();
    repo.set_healthy(false);
    let (status, body) = send(&app, Method::GET, "/dogs", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal server error" }));
}

// =============================================================================
// GET /dogs/{id}
// =============================================================================

#[tokio::test]
async fn test_get_existing_dog() {
    let (app, repo) = test_app();
    let id = seed(&repo, "Rex");
    let (status, body) = send(&app, Method::GET, &format!("/dogs/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": id,
            "name": "Rex",
            "breed": "Beagle",
            "description": "Loves walks",
            "age": 5
        })
    );
}

#[tokio::test]
async fn test_get_missing_dog_is_no_content() {
    let (app, _) = test_app();
    let (status, _) = send(&app, Method::GET, "/dogs/999", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_get_fractional_id_is_no_content() {
    let (app, repo) = test_app();
    seed(&repo, "Rex");
    let (status, _) = send(&app, Method::GET, "/dogs/1.5", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_get_non_numeric_id() {
    let (app, _) = test_app();
    let (status, body) = send(&app, Method::GET, "/dogs/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "id should be a number" }));
}

#[tokio::test]
async fn test_get_store_failure() {
    let (app, repo) = test_app();
    let id = seed(&repo, "Rex");
    repo.set_healthy(false);
    let (status, body) = send(&app, Method::GET, &format!("/dogs/{}", id), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal server error" }));
}

// =============================================================================
// POST /dogs
// =============================================================================

#[tokio::test]
async fn test_create_returns_created_dog() {
    let (app, _) = test_app();
    let (status, body) = send(&app, Method::POST, "/dogs", Some(rex())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].is_i64());
    assert_eq!(body["name"], "Rex");
    assert_eq!(body["breed"], "Lab");
    assert_eq!(body["description"], "Friendly");
    assert_eq!(body["age"], 3);
}

#[tokio::test]
async fn test_created_dog_is_retrievable() {
    let (app, _) = test_app();
    for (name, age) in [("Rex", 3), ("Fido", 0), ("Luna", 12)] {
        let payload = json!({
            "name": name,
            "breed": "Mixed",
            "description": format!("{} the dog", name),
            "age": age
        });
        let (status, created) = send(&app, Method::POST, "/dogs", Some(payload.clone())).await;
        assert_eq!(status, StatusCode::CREATED);

        let uri = format!("/dogs/{}", created["id"]);
        let (status, fetched) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
        for key in ["name", "breed", "description", "age"] {
            assert_eq!(fetched[key], payload[key]);
        }
    }
}

#[tokio::test]
async fn test_create_rejects_unknown_key() {
    let (app, repo) = test_app();
    let mut payload = rex();
    payload["foo"] = json!("bar");
    let (status, body) = send(&app, Method::POST, "/dogs", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_array().unwrap();
    assert!(errors.contains(&json!("'foo' is not a valid key")));
    assert_eq!(repo.dog_count(), 0);
}

#[tokio::test]
async fn test_create_rejects_string_age() {
    let (app, _) = test_app();
    let mut payload = rex();
    payload["age"] = json!("5");
    let (status, body) = send(&app, Method::POST, "/dogs", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "errors": ["age should be a number"] }));
}

#[tokio::test]
async fn test_create_collects_every_error() {
    let (app, _) = test_app();
    let payload = json!({ "foo": 1, "name": 7 });
    let (status, body) = send(&app, Method::POST, "/dogs", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "errors": [
                "'foo' is not a valid key",
                "name should be a string",
                "breed should be a string",
                "description should be a string",
                "age should be a number"
            ]
        })
    );
}

#[tokio::test]
async fn test_create_without_body() {
    let (app, _) = test_app();
    let (status, body) = send(&app, Method::POST, "/dogs", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_create_malformed_json() {
    let (app, _) = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/dogs")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": \"Rex\""))
        .unwrap();
    let (status, body) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Malformed JSON body"));
}

#[tokio::test]
async fn test_create_non_object_body() {
    let (app, _) = test_app();
    let (status, body) = send(&app, Method::POST, "/dogs", Some(json!([rex()]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "errors": ["request body should be a JSON object"] })
    );
}

#[tokio::test]
async fn test_create_oversized_body() {
    let (app, _) = test_app();
    let mut payload = rex();
    payload["description"] = json!("x".repeat(200 * 1024));
    let (status, _) = send(&app, Method::POST, "/dogs", Some(payload)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_create_store_failure() {
    let (app, repo) = test_app();
    repo.set_healthy(false);
    let (status, body) = send(&app, Method::POST, "/dogs", Some(rex())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal server error" }));
}

// =============================================================================
// PATCH /dogs/{id}
// =============================================================================

#[tokio::test]
async fn test_patch_single_field() {
    let (app, repo) = test_app();
    let id = seed(&repo, "Rex");
    let uri = format!("/dogs/{}", id);

    let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({ "age": 10 }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "id": id,
            "name": "Rex",
            "breed": "Beagle",
            "description": "Loves walks",
            "age": 10
        })
    );

    let (_, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn test_patch_empty_body_keeps_record() {
    let (app, repo) = test_app();
    let id = seed(&repo, "Rex");
    let (status, body) = send(&app, Method::PATCH, &format!("/dogs/{}", id), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Rex");
    assert_eq!(body["age"], 5);
}

#[tokio::test]
async fn test_patch_validation_errors() {
    let (app, repo) = test_app();
    let id = seed(&repo, "Rex");
    let payload = json!({ "color": "brown", "name": null, "age": 2.5 });
    let (status, body) = send(&app, Method::PATCH, &format!("/dogs/{}", id), Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "errors": [
                "'color' is not a valid key",
                "name should be a string",
                "age should be an integer"
            ]
        })
    );
}

#[tokio::test]
async fn test_patch_missing_dog() {
    let (app, _) = test_app();
    let (status, body) =
        send(&app, Method::PATCH, "/dogs/42", Some(json!({ "name": "Ghost" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Dog not found" }));
}

#[tokio::test]
async fn test_patch_non_numeric_id_is_not_found() {
    let (app, repo) = test_app();
    seed(&repo, "Rex");
    for uri in ["/dogs/rex", "/dogs/NaN", "/dogs/inf"] {
        let (status, body) = send(&app, Method::PATCH, uri, Some(json!({ "age": 1 }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "PATCH {}", uri);
        assert_eq!(body, json!({ "message": "Dog not found" }));
    }
    assert_eq!(repo.list_dogs().await.unwrap()[0].age, 5);
}

#[tokio::test]
async fn test_patch_body_is_validated_before_id() {
    let (app, _) = test_app();
    let (status, body) =
        send(&app, Method::PATCH, "/dogs/abc", Some(json!({ "age": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "errors": ["age should be a number"] }));
}

// =============================================================================
// DELETE /dogs/{id}
// =============================================================================

#[tokio::test]
async fn test_delete_twice() {
    let (app, repo) = test_app();
    let id = seed(&repo, "Rex");
    let uri = format!("/dogs/{}", id);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    assert_eq!(body["name"], "Rex");
    assert_eq!(repo.dog_count(), 0);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_delete_non_numeric_id() {
    let (app, _) = test_app();
    let (status, body) = send(&app, Method::DELETE, "/dogs/NaN", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "id should be a number" }));
}

#[tokio::test]
async fn test_infinity_spellings() {
    let (app, _) = test_app();
    for (method, uri) in [
        (Method::GET, "/dogs/inf"),
        (Method::GET, "/dogs/INF"),
        (Method::DELETE, "/dogs/infinity"),
        (Method::DELETE, "/dogs/-inf"),
    ] {
        let (status, body) = send(&app, method.clone(), uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", method, uri);
        assert_eq!(body, json!({ "message": "id should be a number" }));
    }

    let (status, _) = send(&app, Method::GET, "/dogs/Infinity", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::DELETE, "/dogs/-Infinity", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_delete_store_failure() {
    let (app, repo) = test_app();
    let id = seed(&repo, "Rex");
    repo.set_healthy(false);
    let (status, _) = send(&app, Method::DELETE, &format!("/dogs/{}", id), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(repo.has_dog(id));
}
