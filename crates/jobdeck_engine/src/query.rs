use std::future::Future;
use std::sync::mpsc::Sender;
use std::sync::Arc;

use deck_logging::{deck_debug, deck_warn, set_poll_cycle};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::cache::SnapshotCache;
use crate::client::JobsApi;
use crate::config::{PollSettings, RetryPolicy};
use crate::error::ApiError;
use crate::types::{EngineEvent, Job, JobId};

/// The job-list snapshot shared between the list watcher and mutations.
pub(crate) type ListCache = SnapshotCache<Vec<Job>>;

/// Runs one logical read, retrying transient failures with exponential
/// backoff. A non-retryable error (404) is returned after exactly one
/// attempt.
pub(crate) async fn fetch_with_retry<T, F, Fut>(op: F, retry: &RetryPolicy) -> Result<T, ApiError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(error) if error.is_retryable() && attempt < retry.max_attempts => {
                deck_warn!("request attempt {attempt} failed, retrying: {error}");
                sleep(retry.delay_after(attempt)).await;
            }
            Err(error) => return Err(error),
        }
    }
}

/// Polls `/jobs/results` on a fixed cadence.
///
/// A tick that finds the cache still inside its freshness window skips the
/// network. Invalidation (after a successful mutation) wakes the loop
/// early, so a just-created job shows up without waiting out the interval.
pub(crate) async fn run_list_watcher(
    client: Arc<dyn JobsApi>,
    cache: Arc<ListCache>,
    poll: PollSettings,
    events: Sender<EngineEvent>,
    token: CancellationToken,
) {
    let mut cycle: u64 = 0;
    loop {
        cycle += 1;
        set_poll_cycle(cycle);

        if cache.fresh(poll.list_freshness).is_none() {
            let fetched = tokio::select! {
                fetched = fetch_with_retry(|| client.list_job_results(), &poll.retry) => fetched,
                _ = token.cancelled() => break,
            };
            match fetched {
                Ok(jobs) => {
                    deck_debug!("list poll cycle {cycle}: {} jobs", jobs.len());
                    cache.store(jobs.clone());
                    let _ = events.send(EngineEvent::JobListUpdated { jobs });
                }
                Err(error) => {
                    deck_warn!("list poll cycle {cycle} failed: {error}");
                    let _ = events.send(EngineEvent::JobListFailed { error });
                }
            }
        }

        tokio::select! {
            _ = sleep(poll.list_interval) => {}
            _ = cache.invalidated() => {
                deck_debug!("list cache invalidated; refreshing early");
            }
            _ = token.cancelled() => break,
        }
    }
}

/// Polls one job's detail row while it is pending.
///
/// The only state-dependent scheduling decision in the system: a pending
/// row schedules another fetch after `detail_interval`; the first terminal
/// row stops the loop, as does a 404 (terminal, never retried) or an
/// exhausted retry budget.
pub(crate) async fn run_detail_watcher(
    client: Arc<dyn JobsApi>,
    job_id: JobId,
    poll: PollSettings,
    events: Sender<EngineEvent>,
    token: CancellationToken,
) {
    // Mirrors the front end's query guard: no fetch for a non-positive id.
    if job_id <= 0 {
        return;
    }

    loop {
        let fetched = tokio::select! {
            fetched = fetch_with_retry(|| client.get_job_result(job_id), &poll.retry) => fetched,
            _ = token.cancelled() => break,
        };
        match fetched {
            Ok(job) => {
                let pending = job.is_pending();
                let _ = events.send(EngineEvent::JobDetailUpdated { job });
                if !pending {
                    break;
                }
            }
            Err(error) if error.is_not_found() => {
                let _ = events.send(EngineEvent::JobDetailNotFound { job_id });
                break;
            }
            Err(error) => {
                let _ = events.send(EngineEvent::JobDetailFailed { job_id, error });
                break;
            }
        }

        tokio::select! {
            _ = sleep(poll.detail_interval) => {}
            _ = token.cancelled() => break,
        }
    }
}

/// One-shot health probe against `GET /`.
pub(crate) async fn run_health_probe(
    client: Arc<dyn JobsApi>,
    retry: RetryPolicy,
    events: Sender<EngineEvent>,
) {
    match fetch_with_retry(|| client.health(), &retry).await {
        Ok(health) => {
            let _ = events.send(EngineEvent::HealthChecked {
                message: health.message,
            });
        }
        Err(error) => {
            deck_warn!("health probe failed: {error}");
            let _ = events.send(EngineEvent::HealthFailed { error });
        }
    }
}
