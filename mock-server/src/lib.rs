//! In-process fake of the remote scrum board server.
//!
//! Implements the server contract the client is written against: JSON tasks
//! with server-assigned ids and timestamps, request validation answered with
//! 422 and a structured body, and soft delete: a deleted task stays
//! readable but rejects further mutation with 400. Every request's method
//! and path are recorded and exposed at `GET /__requests` so client tests
//! can assert exactly which requests were issued.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Json, Router,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// Statuses the server accepts; anything else fails validation.
pub const ALLOWED_STATUSES: [&str; 3] = ["TODO", "IN_PROGRESS", "DONE"];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub status: String,
    pub deleted: bool,
    pub creation_time: NaiveDateTime,
    pub update_time: NaiveDateTime,
}

/// Create/update payload. Fields are optional here so that a missing title
/// reaches validation and produces the structured 422 body instead of a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct TaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// One observed request, in arrival order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
}

#[derive(Clone)]
struct AppState {
    // BTreeMap keyed by the monotonically assigned id keeps list order
    // stable: creation order.
    tasks: Arc<RwLock<BTreeMap<u64, Task>>>,
    next_id: Arc<AtomicU64>,
    requests: Arc<RwLock<Vec<RecordedRequest>>>,
}

pub fn app() -> Router {
    let state = AppState {
        tasks: Arc::new(RwLock::new(BTreeMap::new())),
        next_id: Arc::new(AtomicU64::new(1)),
        requests: Arc::new(RwLock::new(Vec::new())),
    };
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/{id}", get(get_task).put(update_task).delete(delete_task))
        .route("/__requests", get(recorded_requests))
        .layer(middleware::from_fn_with_state(state.clone(), record_request))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn record_request(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    if !path.starts_with("/__") {
        state.requests.write().await.push(RecordedRequest {
            method: request.method().to_string(),
            path,
        });
    }
    next.run(request).await
}

async fn recorded_requests(State(state): State<AppState>) -> Json<Vec<RecordedRequest>> {
    Json(state.requests.read().await.clone())
}

async fn list_tasks(State(state): State<AppState>) -> Json<Vec<Task>> {
    let tasks = state.tasks.read().await;
    Json(tasks.values().cloned().collect())
}

async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Task>, (StatusCode, Json<Value>)> {
    let tasks = state.tasks.read().await;
    // Soft-deleted tasks are still readable.
    tasks.get(&id).cloned().map(Json).ok_or_else(|| not_found(id))
}

async fn create_task(
    State(state): State<AppState>,
    Json(input): Json<TaskRequest>,
) -> Result<(StatusCode, Json<Task>), (StatusCode, Json<Value>)> {
    let (title, description, status) = validate(&input)?;
    let now = now();
    let task = Task {
        id: state.next_id.fetch_add(1, Ordering::SeqCst),
        title,
        description,
        status,
        deleted: false,
        creation_time: now,
        update_time: now,
    };
    state.tasks.write().await.insert(task.id, task.clone());
    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(input): Json<TaskRequest>,
) -> Result<Json<Task>, (StatusCode, Json<Value>)> {
    let mut tasks = state.tasks.write().await;
    let task = tasks.get_mut(&id).ok_or_else(|| not_found(id))?;
    if task.deleted {
        return Err(already_deleted(id));
    }
    let (title, description, status) = validate(&input)?;
    task.title = title;
    task.description = description;
    task.status = status;
    task.update_time = now();
    Ok(Json(task.clone()))
}

async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    let mut tasks = state.tasks.write().await;
    let task = tasks.get_mut(&id).ok_or_else(|| not_found(id))?;
    if task.deleted {
        return Err(already_deleted(id));
    }
    task.deleted = true;
    task.update_time = now();
    Ok(StatusCode::NO_CONTENT)
}

fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

fn not_found(id: u64) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("task {id} not found") })),
    )
}

fn already_deleted(id: u64) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": format!("task {id} is already deleted") })),
    )
}

/// Title must be present and non-blank; status must be one of the allowed
/// set. Description defaults to empty.
fn validate(input: &TaskRequest) -> Result<(String, String, String), (StatusCode, Json<Value>)> {
    let mut errors = serde_json::Map::new();

    let title = input.title.clone().unwrap_or_default();
    if title.trim().is_empty() {
        errors.insert("title".to_string(), json!("must not be blank"));
    }

    let status = input.status.clone().unwrap_or_default();
    if !ALLOWED_STATUSES.contains(&status.as_str()) {
        errors.insert(
            "status".to_string(),
            json!(format!("must be one of {ALLOWED_STATUSES:?}")),
        );
    }

    if !errors.is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "message": "validation failed", "errors": errors })),
        ));
    }
    Ok((title, input.description.clone().unwrap_or_default(), status))
}
