use url::Url;

use crate::state::{DetailState, HealthState, NoticeKind};
use crate::{AppState, CommandKey, Effect, JobKind, JobSubmission, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::JobListLoaded(rows) => {
            state.replace_jobs(rows);
            Vec::new()
        }
        Msg::JobListFailed { message } => {
            state.fail_list(message);
            Vec::new()
        }
        Msg::JobDetailLoaded(snapshot) => {
            // Ignore stale events for a watch that was already torn down or
            // retargeted; list and detail panels stay independent.
            if state.detail().job_id() == Some(snapshot.id) {
                state.set_detail(DetailState::Ready(snapshot));
            }
            Vec::new()
        }
        Msg::JobDetailNotFound { job_id } => {
            if state.detail().job_id() == Some(job_id) {
                state.set_detail(DetailState::NotFound { job_id });
            }
            Vec::new()
        }
        Msg::JobDetailFailed { job_id, message } => {
            if state.detail().job_id() == Some(job_id) {
                state.set_detail(DetailState::Failed { job_id, message });
            }
            Vec::new()
        }
        Msg::HealthChecked { message } => {
            state.set_health(HealthState::Online { message });
            Vec::new()
        }
        Msg::HealthUnreachable { message } => {
            state.set_health(HealthState::Offline { message });
            Vec::new()
        }
        Msg::SubmitOsCommand { command_key } => submit_os_command(&mut state, &command_key),
        Msg::SubmitCrawl { url } => submit_crawl(&mut state, &url),
        Msg::JobSubmitted { kind, task_id } => {
            state.push_notice(NoticeKind::Success, created_text(&kind, &task_id));
            Vec::new()
        }
        Msg::JobSubmitFailed { kind, message } => {
            let text = message.unwrap_or_else(|| failed_text(&kind).to_string());
            state.push_notice(NoticeKind::Error, text);
            Vec::new()
        }
        Msg::JobSelected { job_id } => {
            // Mirrors the query guard: nothing is fetched for a non-positive id.
            if job_id <= 0 {
                return (state, Vec::new());
            }
            let mut effects = Vec::new();
            if let Some(previous) = state.detail().job_id() {
                if previous != job_id {
                    effects.push(Effect::StopJobDetailWatch { job_id: previous });
                }
            }
            state.set_detail(DetailState::Loading { job_id });
            effects.push(Effect::WatchJobDetail { job_id });
            effects
        }
        Msg::DetailClosed => {
            let effects = match state.detail().job_id() {
                Some(job_id) => vec![Effect::StopJobDetailWatch { job_id }],
                None => Vec::new(),
            };
            state.set_detail(DetailState::Hidden);
            effects
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit_os_command(state: &mut AppState, command_key: &str) -> Vec<Effect> {
    let key = command_key.trim();
    if key.is_empty() {
        state.push_notice(NoticeKind::Error, "Please select a command");
        return Vec::new();
    }
    match CommandKey::parse(key) {
        Some(command_key) => vec![Effect::SubmitJob {
            submission: JobSubmission::OsCommand { command_key },
        }],
        None => {
            let available = CommandKey::ALL
                .iter()
                .map(CommandKey::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            state.push_notice(
                NoticeKind::Error,
                format!("Invalid command_key '{key}'. Available: {available}"),
            );
            Vec::new()
        }
    }
}

fn submit_crawl(state: &mut AppState, url: &str) -> Vec<Effect> {
    let url = url.trim();
    if url.is_empty() {
        state.push_notice(NoticeKind::Error, "Please enter a URL to crawl");
        return Vec::new();
    }
    if Url::parse(url).is_err() {
        state.push_notice(
            NoticeKind::Error,
            "Please enter a valid URL (include http:// or https://)",
        );
        return Vec::new();
    }
    vec![Effect::SubmitJob {
        submission: JobSubmission::KatanaCrawl {
            url: url.to_string(),
        },
    }]
}

fn created_text(kind: &JobKind, task_id: &str) -> String {
    match kind {
        JobKind::OsCommand => format!("Command job queued! Task ID: {task_id}"),
        JobKind::KatanaCrawl => format!("Crawler job queued! Task ID: {task_id}"),
        JobKind::Other(_) => format!("Job queued successfully! Task ID: {task_id}"),
    }
}

fn failed_text(kind: &JobKind) -> &'static str {
    match kind {
        JobKind::OsCommand => "Failed to create OS command job",
        JobKind::KatanaCrawl => "Failed to create crawler job",
        JobKind::Other(_) => "Failed to create job",
    }
}
