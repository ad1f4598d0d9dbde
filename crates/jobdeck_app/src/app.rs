use std::thread;
use std::time::Duration;

use deck_logging::deck_warn;
use jobdeck_core::{
    update, AppState, DetailState, Effect, HealthState, JobKind, JobSnapshot, JobStatus,
    ListPhase, Msg,
};
use jobdeck_engine::{parse_job_result, EngineEvent, EngineHandle, Job};

use crate::effects::EffectRunner;
use crate::ui;

/// Cadence of the event pump between renders.
const PUMP_INTERVAL: Duration = Duration::from_millis(100);

/// The update loop: engine events become core messages, core effects go
/// back to the engine, and the views re-render whenever the state says it
/// is dirty.
pub struct App {
    state: AppState,
    runner: EffectRunner,
}

impl App {
    pub fn new(engine: EngineHandle) -> Self {
        Self {
            state: AppState::new(),
            runner: EffectRunner::new(engine),
        }
    }

    /// Applies one message, routes its effects, and prints any notices.
    /// Returns the effects for callers that need to know whether the
    /// message survived validation.
    fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        for notice in self.state.take_notices() {
            println!("{}", ui::render::render_notice(&notice));
        }

        self.runner.enqueue(effects.clone());
        effects
    }

    /// Drains engine events into the state; returns the processed messages.
    fn pump(&mut self) -> Vec<Msg> {
        let mut processed = Vec::new();
        while let Some(event) = self.runner.try_recv() {
            let msg = map_event(event);
            self.dispatch(msg.clone());
            processed.push(msg);
        }
        processed
    }

    /// Live dashboard: list poll plus health probe, re-rendered on change.
    pub fn run_watch(&mut self) {
        self.runner
            .enqueue(vec![Effect::WatchJobList, Effect::CheckHealth]);
        loop {
            self.pump();
            if self.state.consume_dirty() {
                let view = self.state.view();
                // Clear the screen before each repaint.
                print!("\x1b[2J\x1b[1;1H");
                println!("{}", ui::render::render_dashboard(&view));
            }
            thread::sleep(PUMP_INTERVAL);
        }
    }

    /// One-shot history: wait for the first list snapshot, render, done.
    pub fn run_history(&mut self) {
        self.runner.enqueue(vec![Effect::WatchJobList]);
        loop {
            self.pump();
            match self.state.list_phase() {
                ListPhase::Loading => {}
                ListPhase::Ready => {
                    println!("{}", ui::render::render_history(&self.state.view()));
                    return;
                }
                ListPhase::Failed { message } => {
                    eprintln!("Could not load job history: {message}");
                    return;
                }
            }
            thread::sleep(PUMP_INTERVAL);
        }
    }

    /// Follows one job until it settles: renders every update while the
    /// row is pending, exits on the first terminal render, a not-found, or
    /// an exhausted retry budget.
    pub fn run_show(&mut self, job_id: i64) {
        let effects = self.dispatch(Msg::JobSelected { job_id });
        if effects.is_empty() {
            eprintln!("Job id must be a positive integer");
            return;
        }

        loop {
            self.pump();
            if self.state.consume_dirty() {
                self.render_detail();
            }
            match self.state.detail() {
                DetailState::Ready(snapshot) if snapshot.status.is_terminal() => return,
                DetailState::NotFound { .. } | DetailState::Failed { .. } => return,
                _ => {}
            }
            thread::sleep(PUMP_INTERVAL);
        }
    }

    /// Queues an OS command job; validation failures never reach the wire.
    pub fn run_submit_command(&mut self, command_key: String) {
        let effects = self.dispatch(Msg::SubmitOsCommand { command_key });
        if !effects.is_empty() {
            self.wait_for_submission();
        }
    }

    /// Queues a crawl job; validation failures never reach the wire.
    pub fn run_submit_crawl(&mut self, url: String) {
        let effects = self.dispatch(Msg::SubmitCrawl { url });
        if !effects.is_empty() {
            self.wait_for_submission();
        }
    }

    /// Health probe plus one list snapshot, rendered as the status board.
    pub fn run_status(&mut self) {
        self.runner
            .enqueue(vec![Effect::CheckHealth, Effect::WatchJobList]);
        loop {
            self.pump();
            let health_done = !matches!(self.state.health(), HealthState::Checking);
            let list_done = !matches!(self.state.list_phase(), ListPhase::Loading);
            if health_done && list_done {
                println!("{}", ui::render::render_status(&self.state.view()));
                return;
            }
            thread::sleep(PUMP_INTERVAL);
        }
    }

    fn wait_for_submission(&mut self) {
        loop {
            let processed = self.pump();
            if processed.iter().any(|msg| {
                matches!(msg, Msg::JobSubmitted { .. } | Msg::JobSubmitFailed { .. })
            }) {
                return;
            }
            thread::sleep(PUMP_INTERVAL);
        }
    }

    fn render_detail(&self) {
        let parsed = match self.state.detail() {
            DetailState::Ready(snapshot) => Some(parse_job_result(
                snapshot.kind.wire_name(),
                snapshot.result.as_deref(),
            )),
            _ => None,
        };
        println!(
            "{}",
            ui::render::render_detail(&self.state.detail_view(), parsed.as_ref())
        );
    }
}

/// Engine events map one-to-one onto core messages; the seam keeps the
/// core crate free of wire types.
fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::JobListUpdated { jobs } => {
            Msg::JobListLoaded(jobs.into_iter().map(map_job).collect())
        }
        EngineEvent::JobListFailed { error } => Msg::JobListFailed {
            message: error.to_string(),
        },
        EngineEvent::JobDetailUpdated { job } => Msg::JobDetailLoaded(map_job(job)),
        EngineEvent::JobDetailNotFound { job_id } => Msg::JobDetailNotFound { job_id },
        EngineEvent::JobDetailFailed { job_id, error } => Msg::JobDetailFailed {
            job_id,
            message: error.to_string(),
        },
        EngineEvent::JobCreated { job_name, response } => Msg::JobSubmitted {
            kind: JobKind::parse(&job_name),
            task_id: response.task_id,
        },
        EngineEvent::JobCreateFailed { job_name, error } => {
            deck_warn!("job creation failed for {job_name}: {error}");
            Msg::JobSubmitFailed {
                kind: JobKind::parse(&job_name),
                message: error.server_message.clone(),
            }
        }
        EngineEvent::HealthChecked { message } => Msg::HealthChecked { message },
        EngineEvent::HealthFailed { error } => Msg::HealthUnreachable {
            message: error.to_string(),
        },
    }
}

fn map_job(job: Job) -> JobSnapshot {
    JobSnapshot {
        id: job.id,
        kind: JobKind::parse(&job.job_name),
        status: JobStatus::parse(&job.status),
        result: job.result,
        created_at: job.created_at,
        updated_at: job.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire_job(status: &str) -> Job {
        Job {
            id: 7,
            job_name: "os_command".to_string(),
            status: status.to_string(),
            result: None,
            created_at: Some("2026-08-06T10:00:00".to_string()),
            updated_at: None,
        }
    }

    #[test]
    fn wire_rows_map_onto_core_snapshots() {
        let snapshot = map_job(wire_job("success"));
        assert_eq!(snapshot.id, 7);
        assert_eq!(snapshot.kind, JobKind::OsCommand);
        assert_eq!(snapshot.status, JobStatus::Success);
    }

    #[test]
    fn unknown_wire_labels_survive_the_mapping() {
        let mut job = wire_job("paused");
        job.job_name = "nmap_scan".to_string();
        let snapshot = map_job(job);
        assert_eq!(snapshot.kind, JobKind::parse("nmap_scan"));
        assert_eq!(snapshot.status.label(), "paused");
    }

    #[test]
    fn created_events_carry_the_task_id_into_the_notice() {
        let msg = map_event(EngineEvent::JobCreated {
            job_name: "os_command".to_string(),
            response: jobdeck_engine::JobCreateResponse {
                message: "Job queued".to_string(),
                task_id: "ab12".to_string(),
            },
        });
        assert_eq!(
            msg,
            Msg::JobSubmitted {
                kind: JobKind::OsCommand,
                task_id: "ab12".to_string()
            }
        );
    }
}
