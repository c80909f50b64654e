use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, RecordedRequest, Task};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

async fn create(app: &axum::Router, title: &str, status: &str) -> Task {
    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/",
            &format!(r#"{{"title":"{title}","description":"","status":"{status}"}}"#),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
}

// --- list ---

#[tokio::test]
async fn list_tasks_empty() {
    let app = app();
    let resp = app.oneshot(get_request("/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let tasks: Vec<Task> = body_json(resp).await;
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn list_tasks_keeps_creation_order() {
    let app = app();
    create(&app, "First", "TODO").await;
    create(&app, "Second", "TODO").await;

    let resp = app.oneshot(get_request("/")).await.unwrap();
    let tasks: Vec<Task> = body_json(resp).await;
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].title, "First");
    assert_eq!(tasks[1].title, "Second");
    assert!(tasks[0].id < tasks[1].id);
}

// --- create ---

#[tokio::test]
async fn create_task_assigns_server_fields() {
    let app = app();
    let task = create(&app, "Created Task", "TODO").await;

    assert_eq!(task.title, "Created Task");
    assert_eq!(task.status, "TODO");
    assert!(!task.deleted);
    assert_eq!(task.creation_time, task.update_time);
}

#[tokio::test]
async fn create_task_missing_title_returns_422() {
    let app = app();
    let resp = app
        .oneshot(json_request("POST", "/", r#"{"status":"TODO"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = body_json(resp).await;
    assert!(body["errors"].get("title").is_some());
}

#[tokio::test]
async fn create_task_unknown_status_returns_422() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/",
            r#"{"title":"Something","status":"INVALID STATUS"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = body_json(resp).await;
    assert!(body["errors"].get("status").is_some());
}

// --- get ---

#[tokio::test]
async fn get_task_returns_the_task() {
    let app = app();
    let created = create(&app, "Task 8", "TODO").await;

    let resp = app.oneshot(get_request(&format!("/{}", created.id))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let task: Task = body_json(resp).await;
    assert_eq!(task, created);
}

#[tokio::test]
async fn get_task_not_found_carries_message() {
    let app = app();
    let resp = app.oneshot(get_request("/999")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert!(body["message"].as_str().unwrap().contains("not found"));
}

// --- update ---

#[tokio::test]
async fn update_task_applies_fields_and_bumps_update_time() {
    let app = app();
    let created = create(&app, "Before", "TODO").await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", created.id),
            r#"{"title":"After","description":"now described","status":"DONE"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Task = body_json(resp).await;

    assert_eq!(updated.title, "After");
    assert_eq!(updated.description, "now described");
    assert_eq!(updated.status, "DONE");
    assert_eq!(updated.creation_time, created.creation_time);
    assert!(updated.update_time > updated.creation_time);
}

#[tokio::test]
async fn update_unknown_task_returns_404() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "PUT",
            "/999",
            r#"{"title":"Anything","description":"","status":"TODO"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_deleted_task_returns_400() {
    let app = app();
    let created = create(&app, "Doomed", "TODO").await;
    let resp = app
        .clone()
        .oneshot(json_request("DELETE", &format!("/{}", created.id), ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = app
        .oneshot(json_request(
            "PUT",
            &format!("/{}", created.id),
            r#"{"title":"Too late","description":"","status":"DONE"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = body_json(resp).await;
    assert!(body["message"].as_str().unwrap().contains("already deleted"));
}

#[tokio::test]
async fn update_invalid_status_returns_422() {
    let app = app();
    let created = create(&app, "Valid", "TODO").await;

    let resp = app
        .oneshot(json_request(
            "PUT",
            &format!("/{}", created.id),
            r#"{"title":"Valid","description":"","status":"NOT A STATUS"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- delete ---

#[tokio::test]
async fn delete_task_soft_deletes() {
    let app = app();
    let created = create(&app, "Deletable", "TODO").await;

    let resp = app
        .clone()
        .oneshot(json_request("DELETE", &format!("/{}", created.id), ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // Still readable, still listed, but flagged.
    let resp = app
        .clone()
        .oneshot(get_request(&format!("/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let task: Task = body_json(resp).await;
    assert!(task.deleted);

    let resp = app.oneshot(get_request("/")).await.unwrap();
    let tasks: Vec<Task> = body_json(resp).await;
    assert_eq!(tasks.len(), 1);
}

#[tokio::test]
async fn delete_unknown_task_returns_404() {
    let app = app();
    let resp = app
        .oneshot(json_request("DELETE", "/999", ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_twice_returns_400() {
    let app = app();
    let created = create(&app, "Once only", "TODO").await;

    let first = app
        .clone()
        .oneshot(json_request("DELETE", &format!("/{}", created.id), ""))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::NO_CONTENT);

    let second = app
        .oneshot(json_request("DELETE", &format!("/{}", created.id), ""))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
}

// --- request recording ---

#[tokio::test]
async fn requests_are_recorded_in_order() {
    let app = app();
    create(&app, "Recorded", "TODO").await;
    app.clone().oneshot(get_request("/")).await.unwrap();

    let resp = app.oneshot(get_request("/__requests")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let requests: Vec<RecordedRequest> = body_json(resp).await;

    // The recording endpoint itself is not recorded.
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/");
    assert_eq!(requests[1].method, "GET");
    assert_eq!(requests[1].path, "/");
}
