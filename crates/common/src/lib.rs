// ================
// crates/common/src/lib.rs
// ================
//! Wire types shared between the `TaskTrack` client and server.
//! This crate defines the request/response bodies and the task record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sign-up request body.
///
/// Absent fields deserialize to empty strings so presence validation can
/// report them by name instead of the request failing at the JSON layer.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SignUpRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Sign-in request body.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SignInRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Body for creating a task.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: String,
}

/// Body for updating a task. A missing `title` leaves it unchanged.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
}

/// A single task, owned by exactly one user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Task identifier
    pub id: Uuid,
    /// Owning user's identifier
    pub user: Uuid,
    /// Task title
    pub title: String,
}

impl Task {
    pub fn new(user: Uuid, title: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user,
            title,
        }
    }
}

/// Uniform `{"message": ...}` response body.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
