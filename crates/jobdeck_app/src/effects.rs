use jobdeck_core::{Effect, JobSubmission};
use jobdeck_engine::{EngineHandle, EngineEvent, JobCreateRequest, KatanaCrawlData, OsCommandData};

use deck_logging::deck_info;

/// Translates core effects into engine commands and pumps engine events
/// back out for the update loop.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::WatchJobList => {
                    self.engine.watch_job_list();
                }
                Effect::WatchJobDetail { job_id } => {
                    deck_info!("watching job detail, id={job_id}");
                    self.engine.watch_job_detail(job_id);
                }
                Effect::StopJobDetailWatch { job_id } => {
                    self.engine.stop_job_detail(job_id);
                }
                Effect::SubmitJob { submission } => {
                    self.engine.submit(map_submission(submission));
                }
                Effect::CheckHealth => {
                    self.engine.check_health();
                }
            }
        }
    }

    /// Non-blocking event drain.
    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.engine.try_recv()
    }
}

fn map_submission(submission: JobSubmission) -> JobCreateRequest {
    match submission {
        JobSubmission::OsCommand { command_key } => JobCreateRequest::os_command(OsCommandData {
            command_key: command_key.as_str().to_string(),
        }),
        JobSubmission::KatanaCrawl { url } => {
            JobCreateRequest::katana_crawl(KatanaCrawlData { url })
        }
    }
}
