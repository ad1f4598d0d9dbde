use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Server-assigned job identifier.
pub type JobId = i64;

/// One job row as the backend serializes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub job_name: String,
    pub status: String,
    /// JSON-encoded payload whose schema depends on `job_name`; opaque at
    /// this layer, decoded by [`crate::parse`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Job {
    /// Whether the detail watcher should keep re-polling this row.
    pub fn is_pending(&self) -> bool {
        self.status == "pending"
    }
}

/// Response shape of `GET /jobs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobsEnvelope {
    pub jobs: Vec<Job>,
}

/// Body of `POST /jobs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobCreateRequest {
    pub job_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JobCreateRequest {
    /// Builds the `os_command` envelope.
    pub fn os_command(data: OsCommandData) -> Self {
        Self {
            job_name: "os_command".to_string(),
            data: serde_json::to_value(data).ok(),
        }
    }

    /// Builds the `katana_crawl` envelope.
    pub fn katana_crawl(data: KatanaCrawlData) -> Self {
        Self {
            job_name: "katana_crawl".to_string(),
            data: serde_json::to_value(data).ok(),
        }
    }
}

/// Payload for a whitelisted OS command job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsCommandData {
    pub command_key: String,
}

/// Payload for a crawl job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KatanaCrawlData {
    pub url: String,
}

/// Response of `POST /jobs`. `task_id` names the asynchronous worker task;
/// it is surfaced in notifications and never used to look anything up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCreateResponse {
    pub message: String,
    pub task_id: String,
}

/// Response of the `GET /` health probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
}

/// Error body the backend attaches to a failed job creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

/// Everything the engine reports back to the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    JobListUpdated { jobs: Vec<Job> },
    JobListFailed { error: ApiError },
    JobDetailUpdated { job: Job },
    JobDetailNotFound { job_id: JobId },
    JobDetailFailed { job_id: JobId, error: ApiError },
    JobCreated { job_name: String, response: JobCreateResponse },
    JobCreateFailed { job_name: String, error: ApiError },
    HealthChecked { message: String },
    HealthFailed { error: ApiError },
}
