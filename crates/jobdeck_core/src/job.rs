/// Server-assigned job identifier. Only positive ids are ever valid.
pub type JobId = i64;

/// Lifecycle status reported by the backend for a job row.
///
/// The backend only ever moves a job pending -> success | error. `Running`
/// is defined by the wire contract but not produced by the documented
/// lifecycle; unrecognized labels are preserved in `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Running,
    Success,
    Error,
    Other(String),
}

impl JobStatus {
    /// Maps a wire status label onto the closed enumeration.
    pub fn parse(label: &str) -> Self {
        match label {
            "pending" => JobStatus::Pending,
            "running" => JobStatus::Running,
            "success" => JobStatus::Success,
            "error" => JobStatus::Error,
            other => JobStatus::Other(other.to_string()),
        }
    }

    /// The raw wire label for this status.
    pub fn label(&self) -> &str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Running => "running",
            JobStatus::Success => "success",
            JobStatus::Error => "error",
            JobStatus::Other(raw) => raw,
        }
    }

    /// True once the job can no longer change: polling must stop here.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Success | JobStatus::Error)
    }
}

/// The kind of work a job row represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobKind {
    OsCommand,
    KatanaCrawl,
    Other(String),
}

impl JobKind {
    /// Maps a wire `job_name` onto the closed enumeration.
    pub fn parse(name: &str) -> Self {
        match name {
            "os_command" => JobKind::OsCommand,
            "katana_crawl" => JobKind::KatanaCrawl,
            other => JobKind::Other(other.to_string()),
        }
    }

    /// The raw wire `job_name` for this kind.
    pub fn wire_name(&self) -> &str {
        match self {
            JobKind::OsCommand => "os_command",
            JobKind::KatanaCrawl => "katana_crawl",
            JobKind::Other(raw) => raw,
        }
    }
}

/// One fetched job row, as the views see it.
///
/// `result` is an opaque JSON-encoded payload; it is only meaningfully
/// parseable once the status left `Pending`, and decoding it is the IO
/// layer's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSnapshot {
    pub id: JobId,
    pub kind: JobKind,
    pub status: JobStatus,
    pub result: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
