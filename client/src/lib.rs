//! Typed client for a remote scrum board task API.
//!
//! # Overview
//! Five CRUD operations (list, get, create, update, delete), each a single
//! HTTP round trip, with non-2xx statuses translated into a small set of
//! typed errors. The async methods on [`ScrumBoardClient`] are the
//! primitives; [`blocking::ScrumBoardClient`] wraps them for callers without
//! a runtime.
//!
//! # Design
//! - [`transport::Transport`] owns the base URL and timeouts, fixed at
//!   construction, and performs no status interpretation.
//! - Request building and response interpretation are pure functions shared
//!   by both call shapes.
//! - The status-to-error mapping is one `match` over (operation, status),
//!   most specific arm first.
//! - No retries, no caching, no state between calls; the server is the
//!   source of truth for data and validation rules.

pub mod blocking;
pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::ScrumBoardClient;
pub use error::{ClientError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{ClientConfig, Transport, DEFAULT_TIMEOUT_MS};
pub use types::{Task, TaskId, TaskRequest};
