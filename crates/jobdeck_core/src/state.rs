use std::collections::BTreeMap;

use crate::view_model::{build_dashboard, build_detail, DashboardViewModel, DetailViewModel};
use crate::{JobId, JobSnapshot};

/// Where the job-list panel is in its fetch lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListPhase {
    #[default]
    Loading,
    Ready,
    Failed {
        message: String,
    },
}

/// Where the detail panel is. `NotFound` is deliberately distinct from
/// `Failed`: a 404 is terminal and renders its own placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailState {
    #[default]
    Hidden,
    Loading {
        job_id: JobId,
    },
    Ready(JobSnapshot),
    NotFound {
        job_id: JobId,
    },
    Failed {
        job_id: JobId,
        message: String,
    },
}

impl DetailState {
    /// The id this panel is watching, if any.
    pub fn job_id(&self) -> Option<JobId> {
        match self {
            DetailState::Hidden => None,
            DetailState::Loading { job_id }
            | DetailState::NotFound { job_id }
            | DetailState::Failed { job_id, .. } => Some(*job_id),
            DetailState::Ready(snapshot) => Some(snapshot.id),
        }
    }
}

/// Result of the backend health probe.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HealthState {
    #[default]
    Checking,
    Online {
        message: String,
    },
    Offline {
        message: String,
    },
}

/// Severity of a transient operator notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient notification; drained by the front end and shown once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    jobs: BTreeMap<JobId, JobSnapshot>,
    list_phase: ListPhase,
    detail: DetailState,
    health: HealthState,
    notices: Vec<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the dashboard/history view model from the current snapshot.
    pub fn view(&self) -> DashboardViewModel {
        build_dashboard(&self.jobs, &self.list_phase, &self.health)
    }

    /// Builds the detail-panel view model.
    pub fn detail_view(&self) -> DetailViewModel {
        build_detail(&self.detail)
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Drains pending notifications for one-shot display.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn list_phase(&self) -> &ListPhase {
        &self.list_phase
    }

    pub fn detail(&self) -> &DetailState {
        &self.detail
    }

    pub fn health(&self) -> &HealthState {
        &self.health
    }

    pub fn job(&self, id: JobId) -> Option<&JobSnapshot> {
        self.jobs.get(&id)
    }

    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    // Mutators below are crate-private: all writes go through `update`.

    /// Replaces the whole job snapshot; each refresh swaps rather than
    /// patches so views never observe a half-applied list.
    pub(crate) fn replace_jobs(&mut self, rows: Vec<JobSnapshot>) {
        self.jobs = rows.into_iter().map(|row| (row.id, row)).collect();
        self.list_phase = ListPhase::Ready;
        self.dirty = true;
    }

    pub(crate) fn fail_list(&mut self, message: String) {
        self.list_phase = ListPhase::Failed { message };
        self.dirty = true;
    }

    pub(crate) fn set_detail(&mut self, detail: DetailState) {
        self.detail = detail;
        self.dirty = true;
    }

    pub(crate) fn set_health(&mut self, health: HealthState) {
        self.health = health;
        self.dirty = true;
    }

    pub(crate) fn push_notice(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notices.push(Notice {
            kind,
            text: text.into(),
        });
        self.dirty = true;
    }
}
