//! Request building and response interpretation for the scrum board API.
//!
//! # Design
//! `ScrumBoardClient` is stateless between calls; it holds only the
//! transport. Every operation is one `build_*` call, one `Transport::send`,
//! and one `parse_*` call. The build and parse halves are pure functions, so
//! the whole policy is testable without a server and is shared verbatim by
//! the blocking call shape.
//!
//! The status-to-error mapping is a single `match` over (operation, status)
//! in [`classify_failure`], most specific arm first, so the policy reads as
//! the table it is.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ClientError, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{ClientConfig, Transport};
use crate::types::{Task, TaskId, TaskRequest};

/// Which API operation a response is being interpreted for.
///
/// The same status means different things on different operations: a 400 on
/// update or delete targets a soft-deleted task, while any 4xx on create is
/// a rejected payload. Classification therefore takes the operation kind
/// alongside the status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

/// Asynchronous client for the scrum board API.
///
/// Each method performs exactly one HTTP round trip and maps non-2xx
/// statuses to [`ClientError`] variants. For callers without an async
/// runtime, [`crate::blocking::ScrumBoardClient`] exposes the same five
/// operations behind blocking methods.
#[derive(Debug, Clone)]
pub struct ScrumBoardClient {
    transport: Transport,
}

impl ScrumBoardClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            transport: Transport::new(config)?,
        })
    }

    /// Client for `base_url` with default timeouts.
    pub fn with_base_url(base_url: &str) -> Result<Self, ClientError> {
        Self::new(&ClientConfig::new(base_url))
    }

    /// Fetch every task on the board, in the order the server reports them.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        let response = self.transport.send(build_list_tasks()).await?;
        parse_list_tasks(response)
    }

    /// Fetch a single task. Succeeds for soft-deleted tasks too; soft delete
    /// rejects mutation, not retrieval.
    pub async fn get_task(&self, id: &TaskId) -> Result<Task, ClientError> {
        let response = self.transport.send(build_get_task(id)).await?;
        parse_get_task(response)
    }

    /// Create a task and return the server's copy, with its assigned id and
    /// timestamps.
    pub async fn create_task(&self, request: &TaskRequest) -> Result<Task, ClientError> {
        debug!(title = %request.title, status = %request.status, "creating task");
        let response = self.transport.send(build_create_task(request)?).await?;
        parse_create_task(response)
    }

    /// Replace a task's title, description, and status.
    pub async fn update_task(
        &self,
        id: &TaskId,
        request: &TaskRequest,
    ) -> Result<Task, ClientError> {
        let response = self.transport.send(build_update_task(id, request)?).await?;
        parse_update_task(response)
    }

    /// Soft-delete a task. Any response body is discarded on success.
    pub async fn delete_task(&self, id: &TaskId) -> Result<(), ClientError> {
        let response = self.transport.send(build_delete_task(id)).await?;
        parse_delete_task(response)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn build_list_tasks() -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        path: String::new(),
        headers: Vec::new(),
        body: None,
    }
}

fn build_get_task(id: &TaskId) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        path: format!("/{id}"),
        headers: Vec::new(),
        body: None,
    }
}

fn build_create_task(request: &TaskRequest) -> Result<HttpRequest, ClientError> {
    let body = serde_json::to_string(request).map_err(TransportError::Encode)?;
    Ok(HttpRequest {
        method: HttpMethod::Post,
        path: String::new(),
        headers: json_headers(),
        body: Some(body),
    })
}

fn build_update_task(id: &TaskId, request: &TaskRequest) -> Result<HttpRequest, ClientError> {
    let body = serde_json::to_string(request).map_err(TransportError::Encode)?;
    Ok(HttpRequest {
        method: HttpMethod::Put,
        path: format!("/{id}"),
        headers: json_headers(),
        body: Some(body),
    })
}

fn build_delete_task(id: &TaskId) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Delete,
        path: format!("/{id}"),
        headers: Vec::new(),
        body: None,
    }
}

fn parse_list_tasks(response: HttpResponse) -> Result<Vec<Task>, ClientError> {
    let body = expect_success(Operation::List, response)?;
    decode(&body)
}

fn parse_get_task(response: HttpResponse) -> Result<Task, ClientError> {
    let body = expect_success(Operation::Get, response)?;
    decode(&body)
}

fn parse_create_task(response: HttpResponse) -> Result<Task, ClientError> {
    let body = expect_success(Operation::Create, response)?;
    decode(&body)
}

fn parse_update_task(response: HttpResponse) -> Result<Task, ClientError> {
    let body = expect_success(Operation::Update, response)?;
    decode(&body)
}

fn parse_delete_task(response: HttpResponse) -> Result<(), ClientError> {
    expect_success(Operation::Delete, response)?;
    Ok(())
}

/// Pass any 2xx body through; classify everything else.
fn expect_success(op: Operation, response: HttpResponse) -> Result<String, ClientError> {
    if response.is_success() {
        return Ok(response.body);
    }
    debug!(?op, status = response.status, "mapping error response");
    Err(classify_failure(op, response.status, response.body))
}

/// The status-to-error policy for every operation.
///
/// Arms are ordered most specific first: 5xx outranks everything, then the
/// per-status assignments, then create's blanket 4xx, then the unclassified
/// fallback carrying the raw status and body.
fn classify_failure(op: Operation, status: u16, body: String) -> ClientError {
    match (op, status) {
        (_, 500..=599) => ClientError::ServerUnavailable { status },
        (Operation::Update, 422) => ClientError::InvalidTaskRequest { detail: body },
        (Operation::Get | Operation::Update | Operation::Delete, 404) => {
            ClientError::TaskNotFound { detail: body }
        }
        (Operation::Update | Operation::Delete, 400) => {
            ClientError::TaskAlreadyDeleted { detail: body }
        }
        (Operation::Create, 400..=499) => ClientError::InvalidTaskRequest { detail: body },
        (_, _) => ClientError::UnexpectedResponse { status, body },
    }
}

/// Decode a 2xx body; failure is a transport-level contract violation.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|e| TransportError::Decode(e).into())
}
