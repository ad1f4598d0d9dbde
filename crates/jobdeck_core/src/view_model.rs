use std::collections::BTreeMap;

use crate::state::{DetailState, HealthState, ListPhase};
use crate::{JobId, JobKind, JobSnapshot, JobStatus};

/// How many rows the dashboard's recent-jobs panel shows.
pub const RECENT_JOBS: usize = 5;

/// Visual tone of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
    Warning,
    Neutral,
}

/// Fixed glyph/tone/label treatment for a job status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    pub glyph: &'static str,
    pub tone: Tone,
    pub label: String,
}

/// Fixed glyph/label treatment for a job kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindView {
    pub glyph: &'static str,
    pub label: String,
}

/// Total mapping from status to badge. Success/error/pending each get a
/// fixed treatment; everything else takes the neutral default arm, keeping
/// the raw label visible.
pub fn status_badge(status: &JobStatus) -> StatusBadge {
    let label = capitalize(status.label());
    match status {
        JobStatus::Success => StatusBadge {
            glyph: "✓",
            tone: Tone::Success,
            label,
        },
        JobStatus::Error => StatusBadge {
            glyph: "✗",
            tone: Tone::Error,
            label,
        },
        JobStatus::Pending => StatusBadge {
            glyph: "…",
            tone: Tone::Warning,
            label,
        },
        JobStatus::Running | JobStatus::Other(_) => StatusBadge {
            glyph: "·",
            tone: Tone::Neutral,
            label,
        },
    }
}

/// Total mapping from kind to glyph/label; unrecognized names fall back to
/// the raw wire name.
pub fn kind_view(kind: &JobKind) -> KindView {
    match kind {
        JobKind::OsCommand => KindView {
            glyph: "$",
            label: "OS COMMAND".to_string(),
        },
        JobKind::KatanaCrawl => KindView {
            glyph: "@",
            label: "KATANA CRAWL".to_string(),
        },
        JobKind::Other(raw) => KindView {
            glyph: "?",
            label: raw.clone(),
        },
    }
}

/// Counts derived fresh from the current snapshot on every view build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JobStats {
    pub total: usize,
    pub pending: usize,
    pub success: usize,
    pub error: usize,
    pub os_commands: usize,
    pub crawls: usize,
}

impl JobStats {
    /// Whole-percent success rate; 0 when there are no jobs yet.
    pub fn success_rate(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.success as f64 / self.total as f64) * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub job_id: JobId,
    pub kind: KindView,
    pub badge: StatusBadge,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// One lane of the system-health summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthLane {
    #[default]
    Checking,
    Online,
    Offline,
}

/// Derived health of the visible subsystems. `api` follows the health
/// probe; `database` and `queue` follow job-list availability; `crawler`
/// is online once a successful crawl row exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SystemHealthView {
    pub api: HealthLane,
    pub database: HealthLane,
    pub queue: HealthLane,
    pub crawler: HealthLane,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardViewModel {
    pub phase: ListPhase,
    pub stats: JobStats,
    pub rows: Vec<JobRowView>,
    pub recent: Vec<JobRowView>,
    pub health_message: Option<String>,
    pub system: SystemHealthView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailViewModel {
    Hidden,
    Loading {
        job_id: JobId,
    },
    NotFound {
        job_id: JobId,
    },
    Failed {
        job_id: JobId,
        message: String,
    },
    Ready {
        job_id: JobId,
        kind: KindView,
        badge: StatusBadge,
        result: Option<String>,
        created_at: Option<String>,
        updated_at: Option<String>,
    },
}

pub(crate) fn build_dashboard(
    jobs: &BTreeMap<JobId, JobSnapshot>,
    phase: &ListPhase,
    health: &HealthState,
) -> DashboardViewModel {
    let mut stats = JobStats {
        total: jobs.len(),
        ..JobStats::default()
    };
    for job in jobs.values() {
        match job.status {
            JobStatus::Pending => stats.pending += 1,
            JobStatus::Success => stats.success += 1,
            JobStatus::Error => stats.error += 1,
            JobStatus::Running | JobStatus::Other(_) => {}
        }
        match job.kind {
            JobKind::OsCommand => stats.os_commands += 1,
            JobKind::KatanaCrawl => stats.crawls += 1,
            JobKind::Other(_) => {}
        }
    }

    let rows: Vec<JobRowView> = jobs.values().map(row_view).collect();
    // Highest ids are the newest rows; the recent panel shows them first.
    let recent = jobs.values().rev().take(RECENT_JOBS).map(row_view).collect();

    let health_message = match health {
        HealthState::Online { message } => Some(message.clone()),
        _ => None,
    };

    DashboardViewModel {
        phase: phase.clone(),
        stats,
        rows,
        recent,
        health_message,
        system: system_health(jobs, phase, health),
    }
}

pub(crate) fn build_detail(detail: &DetailState) -> DetailViewModel {
    match detail {
        DetailState::Hidden => DetailViewModel::Hidden,
        DetailState::Loading { job_id } => DetailViewModel::Loading { job_id: *job_id },
        DetailState::NotFound { job_id } => DetailViewModel::NotFound { job_id: *job_id },
        DetailState::Failed { job_id, message } => DetailViewModel::Failed {
            job_id: *job_id,
            message: message.clone(),
        },
        DetailState::Ready(snapshot) => DetailViewModel::Ready {
            job_id: snapshot.id,
            kind: kind_view(&snapshot.kind),
            badge: status_badge(&snapshot.status),
            result: snapshot.result.clone(),
            created_at: snapshot.created_at.clone(),
            updated_at: snapshot.updated_at.clone(),
        },
    }
}

fn row_view(job: &JobSnapshot) -> JobRowView {
    JobRowView {
        job_id: job.id,
        kind: kind_view(&job.kind),
        badge: status_badge(&job.status),
        created_at: job.created_at.clone(),
        updated_at: job.updated_at.clone(),
    }
}

fn system_health(
    jobs: &BTreeMap<JobId, JobSnapshot>,
    phase: &ListPhase,
    health: &HealthState,
) -> SystemHealthView {
    let api = match health {
        HealthState::Checking => HealthLane::Checking,
        HealthState::Online { .. } => HealthLane::Online,
        HealthState::Offline { .. } => HealthLane::Offline,
    };
    let store = match phase {
        ListPhase::Loading => HealthLane::Checking,
        ListPhase::Ready => HealthLane::Online,
        ListPhase::Failed { .. } => HealthLane::Offline,
    };
    let crawler = match phase {
        ListPhase::Loading => HealthLane::Checking,
        _ => {
            let crawled = jobs.values().any(|job| {
                job.kind == JobKind::KatanaCrawl && job.status == JobStatus::Success
            });
            if crawled {
                HealthLane::Online
            } else {
                HealthLane::Offline
            }
        }
    };
    SystemHealthView {
        api,
        database: store,
        queue: store,
        crawler,
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
