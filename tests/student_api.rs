//! Student API Tests
//!
//! Drives the full axum router over the in-memory store:
//! - Status codes and envelopes for every endpoint
//! - Filter semantics of the list endpoint
//! - Identifier handling (missing, malformed, never returned)
//! - The create / list / update / delete lifecycle

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use student_records::http_server::{HttpServer, HttpServerConfig};
use student_records::students::{MemoryStudentStore, StudentService};
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

fn app() -> Router {
    let service = StudentService::new(Arc::new(MemoryStudentStore::new()));
    HttpServer::build_router(&HttpServerConfig::default(), service)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Option<Value>) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        None
    } else {
        Some(serde_json::from_slice(&bytes).unwrap())
    };
    (status, json)
}

async fn create(app: &Router, student: Value) -> String {
    let (status, body) = send(app, "POST", "/students/", Some(student)).await;
    assert_eq!(status, StatusCode::CREATED);
    body.unwrap()["id"].as_str().unwrap().to_string()
}

async fn seed(app: &Router) {
    for (name, age, country) in [
        ("Ana", 20, "PE"),
        ("Luis", 17, "PE"),
        ("Sofia", 30, "CL"),
        ("Mateo", 18, "CL"),
    ] {
        create(
            app,
            json!({"name": name, "age": age, "address": {"city": "x", "country": country}}),
        )
        .await;
    }
}

fn names(body: &Value) -> Vec<String> {
    let mut names: Vec<String> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    names
}

// =============================================================================
// Root and Health
// =============================================================================

#[tokio::test]
async fn test_root_greeting() {
    let (status, body) = send(&app(), "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["message"], "CosmoCloud Backend assignment");
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app();

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["status"], "ok");

    let (status, _) = send(&app, "GET", "/health/store", None).await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// List
// =============================================================================

#[tokio::test]
async fn test_list_without_filters_returns_all() {
    let app = app();
    seed(&app).await;

    let (status, body) = send(&app, "GET", "/students/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body.unwrap()), vec!["Ana", "Luis", "Mateo", "Sofia"]);

    let (status, body) = send(&app, "GET", "/students", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["data"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_list_age_is_inclusive_minimum() {
    let app = app();
    seed(&app).await;

    let (status, body) = send(&app, "GET", "/students/?age=18", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body.unwrap()), vec!["Ana", "Mateo", "Sofia"]);
}

#[tokio::test]
async fn test_list_country_and_combined() {
    let app = app();
    seed(&app).await;

    let (_, body) = send(&app, "GET", "/students/?country=PE", None).await;
    assert_eq!(names(&body.unwrap()), vec!["Ana", "Luis"]);

    let (_, body) = send(&app, "GET", "/students/?age=19&country=CL", None).await;
    assert_eq!(names(&body.unwrap()), vec!["Sofia"]);

    let (_, body) = send(&app, "GET", "/students/?country=AR", None).await;
    assert!(body.unwrap()["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_projects_name_and_age_only() {
    let app = app();
    seed(&app).await;

    let (_, body) = send(&app, "GET", "/students/?country=CL&age=30", None).await;
    assert_eq!(body.unwrap(), json!({"data": [{"name": "Sofia", "age": 30}]}));
}

#[tokio::test]
async fn test_list_rejects_bad_age() {
    let app = app();

    let (status, body) = send(&app, "GET", "/students/?age=0", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body.unwrap()["code"], 422);

    let (status, _) = send(&app, "GET", "/students/?age=-4", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "GET", "/students/?age=old", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Get / Update / Delete
// =============================================================================

#[tokio::test]
async fn test_get_strips_identifier() {
    let app = app();
    let input = json!({"name": "Ana", "age": 20, "address": {"country": "PE"}});
    let id = create(&app, input.clone()).await;

    let (status, body) = send(&app, "GET", &format!("/students/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap(), json!({"student": input}));
}

#[tokio::test]
async fn test_unknown_and_malformed_ids() {
    let app = app();
    let absent = "65f1a2b3c4d5e6f708192a3b";

    for (method, body) in [("GET", None), ("PATCH", Some(json!({"age": 1}))), ("DELETE", None)] {
        let (status, response) =
            send(&app, method, &format!("/students/{}", absent), body.clone()).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} unknown id", method);
        assert_eq!(response.unwrap()["error"], "Student not found");

        let (status, _) = send(&app, method, "/students/not-an-id", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} malformed id", method);
    }
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let app = app();
    let id = create(
        &app,
        json!({"name": "Ana", "age": 20, "address": {"country": "PE"}}),
    )
    .await;
    let uri = format!("/students/{}", id);

    let (status, body) = send(&app, "PATCH", &uri, Some(json!({"age": 5}))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_none());

    let (_, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(
        body.unwrap()["student"],
        json!({"name": "Ana", "age": 5, "address": {"country": "PE"}})
    );

    // Same payload again changes nothing and is reported as a failure
    let (status, body) = send(&app, "PATCH", &uri, Some(json!({"age": 5}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.unwrap()["error"], "Failed to update student");
}

#[tokio::test]
async fn test_update_cannot_change_identifier() {
    let app = app();
    let id = create(&app, json!({"name": "Ana", "age": 20})).await;
    let uri = format!("/students/{}", id);

    let (status, _) = send(
        &app,
        "PATCH",
        &uri,
        Some(json!({"_id": "65f1a2b3c4d5e6f708192a3b", "age": 21})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["student"]["age"], 21);
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let app = app();
    let id = create(&app, json!({"name": "Ana"})).await;
    let uri = format!("/students/{}", id);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap(), json!({}));

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Lifecycle
// =============================================================================

/// Create, filter, patch, delete, then the record is gone.
#[tokio::test]
async fn test_full_lifecycle() {
    let app = app();

    let id = create(
        &app,
        json!({"name": "Ana", "age": 20, "address": {"country": "PE"}}),
    )
    .await;

    let (status, body) = send(&app, "GET", "/students/?age=18&country=PE", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.unwrap()["data"]
        .as_array()
        .unwrap()
        .contains(&json!({"name": "Ana", "age": 20})));

    let uri = format!("/students/{}", id);
    let (status, _) = send(&app, "PATCH", &uri, Some(json!({"age": 21}))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
