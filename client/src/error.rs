//! Error types for the scrum board API client.
//!
//! # Design
//! Two layers. `TransportError` covers failures where no interpretable
//! response exists: the connection could not be established, a timeout
//! elapsed, or a 2xx body did not decode (a malformed success response is a
//! contract violation by the server, not a domain outcome). `ClientError`
//! adds the domain taxonomy derived from status codes; each variant that
//! corresponds to a server rejection carries the server's error body as
//! diagnostic detail. Nothing is retried and nothing is swallowed; every
//! failure is the caller's to handle.

use thiserror::Error;

/// Failures below the level of an interpretable HTTP response.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The connection could not be established or a timeout elapsed.
    #[error("request could not be completed: {0}")]
    Http(#[from] reqwest::Error),

    /// The request payload could not be encoded as JSON.
    #[error("request body could not be encoded: {0}")]
    Encode(serde_json::Error),

    /// A success response carried a body that does not decode into the
    /// expected type.
    #[error("response body could not be decoded: {0}")]
    Decode(serde_json::Error),

    /// The blocking runtime could not be started.
    #[error("blocking runtime could not be started: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Errors surfaced by every client operation, in both call shapes.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server returned 404; no task exists under the requested id.
    #[error("task not found: {detail}")]
    TaskNotFound { detail: String },

    /// The server returned 400 for an operation targeting a soft-deleted
    /// task. The task is still readable; further mutation is rejected.
    #[error("task already deleted: {detail}")]
    TaskAlreadyDeleted { detail: String },

    /// The server rejected the request payload. `detail` is typically the
    /// server's structured validation feedback.
    #[error("invalid task request: {detail}")]
    InvalidTaskRequest { detail: String },

    /// The server returned 5xx. The client does not retry; whether and when
    /// to try again is the caller's decision.
    #[error("server unavailable (HTTP {status})")]
    ServerUnavailable { status: u16 },

    /// A non-2xx status with no classification for the operation that
    /// produced it. Carries the raw status and body so the caller can decide.
    #[error("unexpected response (HTTP {status}): {body}")]
    UnexpectedResponse { status: u16, body: String },
}
