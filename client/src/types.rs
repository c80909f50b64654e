//! Domain DTOs for the scrum board API.
//!
//! # Design
//! Field names and casing (`creationTime`, `updateTime`) are a compatibility
//! contract with the server and must round-trip losslessly; unknown future
//! fields are ignored rather than rejected. `status` stays a plain string
//! because the server is the authority on the allowed set; the client must
//! be able to send an out-of-set status and surface the server's validation
//! feedback instead of failing before the request is ever issued.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque task identifier.
///
/// The server assigns ids. Deployments disagree on the wire shape (numeric
/// in some, string UUIDs in others), so deserialization accepts both and the
/// value is treated as text from then on. The client never manufactures an
/// id of its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TaskId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for TaskId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<u64> for TaskId {
    fn from(raw: u64) -> Self {
        Self(raw.to_string())
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Self(n.to_string()),
            Raw::Text(s) => Self(s),
        })
    }
}

/// A task as reported by the server.
///
/// Values are never mutated in place; every mutation goes through an explicit
/// update or delete call and the client replaces its copy with whatever the
/// server returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub status: String,
    pub deleted: bool,
    pub creation_time: NaiveDateTime,
    pub update_time: NaiveDateTime,
}

/// Request payload for creating or updating a task.
///
/// Id and timestamps are server-assigned and never supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRequest {
    pub title: String,
    pub description: String,
    pub status: String,
}

impl TaskRequest {
    pub fn new(title: &str, description: &str, status: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            status: status.to_string(),
        }
    }
}
