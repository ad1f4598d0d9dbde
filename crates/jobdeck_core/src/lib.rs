//! Jobdeck core: pure state machine and view-model helpers.
mod effect;
mod job;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{CommandKey, Effect, JobSubmission};
pub use job::{JobId, JobKind, JobSnapshot, JobStatus};
pub use msg::Msg;
pub use state::{AppState, DetailState, HealthState, ListPhase, Notice, NoticeKind};
pub use update::update;
pub use view_model::{
    kind_view, status_badge, DashboardViewModel, DetailViewModel, HealthLane, JobRowView,
    JobStats, KindView, StatusBadge, SystemHealthView, Tone, RECENT_JOBS,
};
