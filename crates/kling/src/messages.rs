//! Wire types for the Kling virtual try-on endpoints.
//!
//! Every response shares the envelope `{code, message, request_id, data}`.
//! Only the fields the client acts on are modelled; unknown fields are
//! ignored.

use serde::{Deserialize, Serialize};

/// Model identifier sent with every submission.
pub const MODEL_NAME: &str = "kolors-virtual-try-on-v1";

/// Opaque identifier of a remote try-on task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of `POST /v1/images/kolors-virtual-try-on`.
#[derive(Debug, Clone, Serialize)]
pub struct TryOnRequest {
    pub model_name: String,
    /// Garment photo, base64 JPEG.
    pub cloth_image: String,
    /// Person photo, base64 JPEG.
    pub human_image: String,
    pub seed: u32,
}

impl TryOnRequest {
    pub fn new(human_image: String, cloth_image: String, seed: u32) -> Self {
        Self {
            model_name: MODEL_NAME.to_string(),
            cloth_image,
            human_image,
            seed,
        }
    }
}

/// Response envelope shared by all endpoints.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    pub data: Option<T>,
}

/// `data` of a submission response.
#[derive(Debug, Deserialize)]
pub struct SubmitData {
    pub task_id: TaskId,
}

/// Remote task status as reported by the query endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    /// Queued or still running (`submitted`, `processing`, ...).
    Pending(String),
    /// `succeed`
    Succeeded,
    /// `failed`
    Failed,
}

impl TaskStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "succeed" => TaskStatus::Succeeded,
            "failed" => TaskStatus::Failed,
            other => TaskStatus::Pending(other.to_string()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, TaskStatus::Pending(_))
    }
}

/// `data` of a query response.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskInfo {
    pub task_id: TaskId,
    pub task_status: String,
    #[serde(default)]
    pub task_status_msg: Option<String>,
    #[serde(default)]
    pub task_result: Option<TaskResult>,
}

impl TaskInfo {
    pub fn status(&self) -> TaskStatus {
        TaskStatus::parse(&self.task_status)
    }

    /// URL of the first generated image, if the result carries one.
    pub fn first_image_url(&self) -> Option<&str> {
        self.task_result
            .as_ref()
            .and_then(|r| r.images.first())
            .map(|img| img.url.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskResult {
    #[serde(default)]
    pub images: Vec<ResultImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultImage {
    #[serde(default)]
    pub index: Option<u32>,
    pub url: String,
}
