use crate::{JobId, JobKind, JobSnapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Fresh job-list snapshot from the list watcher.
    JobListLoaded(Vec<JobSnapshot>),
    /// List watcher gave up after its retries.
    JobListFailed { message: String },
    /// Fresh detail row from a detail watcher.
    JobDetailLoaded(JobSnapshot),
    /// Detail fetch hit a 404; terminal, never retried.
    JobDetailNotFound { job_id: JobId },
    /// Detail fetch failed for any other reason.
    JobDetailFailed { job_id: JobId, message: String },
    /// Health probe answered.
    HealthChecked { message: String },
    /// Health probe failed.
    HealthUnreachable { message: String },
    /// Operator asked to run a whitelisted OS command.
    SubmitOsCommand { command_key: String },
    /// Operator asked to crawl a URL.
    SubmitCrawl { url: String },
    /// The mutation layer created a job.
    JobSubmitted { kind: JobKind, task_id: String },
    /// The mutation layer gave up; `message` is the server error when present.
    JobSubmitFailed { kind: JobKind, message: Option<String> },
    /// Operator opened a job's detail view.
    JobSelected { job_id: JobId },
    /// Operator navigated away from the detail view.
    DetailClosed,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
