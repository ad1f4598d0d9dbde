use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::thread;

use tokio_util::sync::CancellationToken;

use crate::cache::SnapshotCache;
use crate::client::{HttpApiClient, JobsApi};
use crate::config::{ClientSettings, PollSettings};
use crate::error::ApiError;
use crate::mutation;
use crate::query;
use crate::types::{EngineEvent, JobCreateRequest, JobId};

enum EngineCommand {
    WatchJobList,
    WatchJobDetail { job_id: JobId },
    StopJobDetail { job_id: JobId },
    Submit { request: JobCreateRequest },
    CheckHealth,
}

/// Handle to the engine's background thread.
///
/// The thread owns a tokio runtime; watchers and mutations run as tasks on
/// it and report back over the event channel. Dropping the handle closes
/// the command channel, which cancels every watcher and tears the runtime
/// down.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings, poll: PollSettings) -> Result<Self, ApiError> {
        let client: Arc<dyn JobsApi> = Arc::new(HttpApiClient::new(settings)?);
        Ok(Self::with_client(client, poll))
    }

    /// Runs the engine over any [`JobsApi`] implementation; the seam tests
    /// use to script the backend.
    pub fn with_client(client: Arc<dyn JobsApi>, poll: PollSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let cache = Arc::new(SnapshotCache::new());
            let mut list_token: Option<CancellationToken> = None;
            let mut detail_tokens: HashMap<JobId, CancellationToken> = HashMap::new();

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::WatchJobList => {
                        // One list watcher is enough; every panel shares it.
                        if list_token.is_some() {
                            continue;
                        }
                        let token = CancellationToken::new();
                        list_token = Some(token.clone());
                        runtime.spawn(query::run_list_watcher(
                            client.clone(),
                            cache.clone(),
                            poll.clone(),
                            event_tx.clone(),
                            token,
                        ));
                    }
                    EngineCommand::WatchJobDetail { job_id } => {
                        let token = CancellationToken::new();
                        // Re-selecting an id replaces its watcher so at most
                        // one loop polls any given row.
                        if let Some(old) = detail_tokens.insert(job_id, token.clone()) {
                            old.cancel();
                        }
                        runtime.spawn(query::run_detail_watcher(
                            client.clone(),
                            job_id,
                            poll.clone(),
                            event_tx.clone(),
                            token,
                        ));
                    }
                    EngineCommand::StopJobDetail { job_id } => {
                        if let Some(token) = detail_tokens.remove(&job_id) {
                            token.cancel();
                        }
                    }
                    EngineCommand::Submit { request } => {
                        runtime.spawn(mutation::run_submit(
                            client.clone(),
                            cache.clone(),
                            request,
                            event_tx.clone(),
                        ));
                    }
                    EngineCommand::CheckHealth => {
                        runtime.spawn(query::run_health_probe(
                            client.clone(),
                            poll.retry.clone(),
                            event_tx.clone(),
                        ));
                    }
                }
            }

            // Command channel closed: cancel watchers before the runtime drops.
            if let Some(token) = list_token {
                token.cancel();
            }
            for token in detail_tokens.values() {
                token.cancel();
            }
        });

        Self { cmd_tx, event_rx }
    }

    /// Starts the 5-second job-list poll. Idempotent.
    pub fn watch_job_list(&self) {
        let _ = self.cmd_tx.send(EngineCommand::WatchJobList);
    }

    /// Starts polling one job's detail row.
    pub fn watch_job_detail(&self, job_id: JobId) {
        let _ = self.cmd_tx.send(EngineCommand::WatchJobDetail { job_id });
    }

    /// Cancels a detail subscription; no further requests for this id.
    pub fn stop_job_detail(&self, job_id: JobId) {
        let _ = self.cmd_tx.send(EngineCommand::StopJobDetail { job_id });
    }

    /// Submits a job-creation request.
    pub fn submit(&self, request: JobCreateRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Submit { request });
    }

    /// Fires a one-shot health probe.
    pub fn check_health(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CheckHealth);
    }

    /// Non-blocking event drain for the front end's render loop.
    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}
