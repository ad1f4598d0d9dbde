use std::sync::mpsc::Sender;
use std::sync::Arc;

use deck_logging::{deck_info, deck_warn};

use crate::client::JobsApi;
use crate::query::ListCache;
use crate::types::{EngineEvent, JobCreateRequest};

/// POSTs a job-creation request.
///
/// One transparent retry absorbs transient failures; after that the error
/// surfaces as an event. Success invalidates the list cache, which both
/// clears the stale snapshot and wakes the list watcher so the new row
/// appears on the next read instead of the next interval tick.
pub(crate) async fn run_submit(
    client: Arc<dyn JobsApi>,
    cache: Arc<ListCache>,
    request: JobCreateRequest,
    events: Sender<EngineEvent>,
) {
    let mut outcome = client.create_job(&request).await;
    if let Err(error) = &outcome {
        deck_warn!("job creation failed, retrying once: {error}");
        outcome = client.create_job(&request).await;
    }

    match outcome {
        Ok(response) => {
            deck_info!(
                "created {} job, task_id={}",
                request.job_name,
                response.task_id
            );
            cache.invalidate();
            let _ = events.send(EngineEvent::JobCreated {
                job_name: request.job_name,
                response,
            });
        }
        Err(error) => {
            deck_warn!("job creation gave up: {error}");
            let _ = events.send(EngineEvent::JobCreateFailed {
                job_name: request.job_name,
                error,
            });
        }
    }
}
