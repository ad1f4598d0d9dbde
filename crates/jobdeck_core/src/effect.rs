use crate::JobId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start (or keep) the 5-second job-list poll.
    WatchJobList,
    /// Start polling one job's detail row; re-polls while it is pending.
    WatchJobDetail { job_id: JobId },
    /// Cancel the detail subscription; no further requests for this id.
    StopJobDetailWatch { job_id: JobId },
    /// POST a job-creation request.
    SubmitJob { submission: JobSubmission },
    /// Probe the backend health endpoint.
    CheckHealth,
}

/// A validated job-creation request. Validation happens in `update`; by the
/// time one of these exists it is safe to put on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobSubmission {
    OsCommand { command_key: CommandKey },
    KatanaCrawl { url: String },
}

/// The closed whitelist of runnable OS commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKey {
    List,
    CurrentDir,
    Whoami,
}

impl CommandKey {
    /// Every key the backend accepts, in display order.
    pub const ALL: [CommandKey; 3] = [CommandKey::List, CommandKey::CurrentDir, CommandKey::Whoami];

    /// Parses a wire key; `None` for anything outside the whitelist.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "list" => Some(CommandKey::List),
            "current_dir" => Some(CommandKey::CurrentDir),
            "whoami" => Some(CommandKey::Whoami),
            _ => None,
        }
    }

    /// The wire `command_key` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKey::List => "list",
            CommandKey::CurrentDir => "current_dir",
            CommandKey::Whoami => "whoami",
        }
    }
}
