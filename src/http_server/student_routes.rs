//! Student HTTP Routes
//!
//! CRUD endpoints over the student collection. Both `/students` and
//! `/students/` are served for the collection endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::students::{
    CreatedResponse, ListResponse, StudentFilter, StudentResponse, StudentResult, StudentService,
};

/// Query parameters accepted by the list endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Minimum age (inclusive), must be > 0
    #[serde(default)]
    pub age: Option<i64>,

    /// Exact match on `address.country`
    #[serde(default)]
    pub country: Option<String>,
}

/// Create student routes
pub fn student_routes(service: StudentService) -> Router {
    Router::new()
        .route("/students", get(list_handler).post(create_handler))
        .route("/students/", get(list_handler).post(create_handler))
        .route(
            "/students/:id",
            get(get_handler).patch(update_handler).delete(delete_handler),
        )
        .with_state(service)
}

async fn list_handler(
    State(service): State<StudentService>,
    Query(query): Query<ListQuery>,
) -> StudentResult<Json<ListResponse>> {
    let filter = StudentFilter::new(query.age, query.country)?;
    let result = service.list(&filter).await?;
    Ok(Json(result))
}

async fn get_handler(
    State(service): State<StudentService>,
    Path(id): Path<String>,
) -> StudentResult<Json<StudentResponse>> {
    let result = service.get(&id).await?;
    Ok(Json(result))
}

async fn create_handler(
    State(service): State<StudentService>,
    Json(body): Json<Map<String, Value>>,
) -> StudentResult<(StatusCode, Json<CreatedResponse>)> {
    let result = service.create(body).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

async fn update_handler(
    State(service): State<StudentService>,
    Path(id): Path<String>,
    Json(body): Json<Map<String, Value>>,
) -> StudentResult<StatusCode> {
    service.update(&id, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_handler(
    State(service): State<StudentService>,
    Path(id): Path<String>,
) -> StudentResult<(StatusCode, Json<Value>)> {
    service.delete(&id).await?;
    Ok((StatusCode::OK, Json(json!({}))))
}
