//! Blocking call shape over the async client.
//!
//! # Design
//! Each client owns a current-thread tokio runtime and runs the async
//! primitives to completion on it. Request building and response
//! interpretation exist only once, in [`crate::client`]; the two call shapes
//! differ solely in where they suspend.

use tokio::runtime::{Builder, Runtime};

use crate::error::{ClientError, TransportError};
use crate::transport::ClientConfig;
use crate::types::{Task, TaskId, TaskRequest};

/// Blocking client for the scrum board API.
///
/// Must be constructed and used outside of an async runtime; calling into it
/// from async code panics, exactly like blocking on any runtime from within
/// one. Error mapping is identical to the async client's.
pub struct ScrumBoardClient {
    inner: crate::client::ScrumBoardClient,
    runtime: Runtime,
}

impl ScrumBoardClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(TransportError::Runtime)?;
        Ok(Self {
            inner: crate::client::ScrumBoardClient::new(config)?,
            runtime,
        })
    }

    /// Client for `base_url` with default timeouts.
    pub fn with_base_url(base_url: &str) -> Result<Self, ClientError> {
        Self::new(&ClientConfig::new(base_url))
    }

    pub fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        self.runtime.block_on(self.inner.list_tasks())
    }

    pub fn get_task(&self, id: &TaskId) -> Result<Task, ClientError> {
        self.runtime.block_on(self.inner.get_task(id))
    }

    pub fn create_task(&self, request: &TaskRequest) -> Result<Task, ClientError> {
        self.runtime.block_on(self.inner.create_task(request))
    }

    pub fn update_task(&self, id: &TaskId, request: &TaskRequest) -> Result<Task, ClientError> {
        self.runtime.block_on(self.inner.update_task(id, request))
    }

    pub fn delete_task(&self, id: &TaskId) -> Result<(), ClientError> {
        self.runtime.block_on(self.inner.delete_task(id))
    }
}
