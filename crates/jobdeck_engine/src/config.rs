use std::env;
use std::time::Duration;

/// Fallback backend origin when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Operator-facing origin, overridable per deployment.
const API_URL_VAR: &str = "JOBDECK_API_URL";
/// Service-to-service origin for runs inside the backend's network.
const API_URL_INTERNAL_VAR: &str = "JOBDECK_API_URL_INTERNAL";
const DEFAULT_INTERNAL_BASE_URL: &str = "http://jobdeck_api:5000";

/// Transport-level settings for the API gateway client.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientSettings {
    /// Settings for the operator-facing origin, honoring `JOBDECK_API_URL`.
    pub fn from_env() -> Self {
        Self {
            base_url: env::var(API_URL_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            ..Self::default()
        }
    }

    /// Settings for the in-network origin, honoring
    /// `JOBDECK_API_URL_INTERNAL`.
    pub fn from_env_internal() -> Self {
        Self {
            base_url: env::var(API_URL_INTERNAL_VAR)
                .unwrap_or_else(|_| DEFAULT_INTERNAL_BASE_URL.to_string()),
            ..Self::default()
        }
    }

    /// Replaces the base URL, keeping the timeouts.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Retry policy for one logical read or write.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, first try included.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Exponential backoff for the given 1-based attempt, capped.
    pub(crate) fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Scheduling knobs for the polling watchers.
#[derive(Debug, Clone)]
pub struct PollSettings {
    /// Fixed cadence of the job-list poll.
    pub list_interval: Duration,
    /// Window within which a cached list snapshot is served without a fetch.
    pub list_freshness: Duration,
    /// Cadence of a detail poll while its job is still pending.
    pub detail_interval: Duration,
    pub retry: RetryPolicy,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            list_interval: Duration::from_secs(5),
            list_freshness: Duration::from_secs(3),
            detail_interval: Duration::from_secs(3),
            retry: RetryPolicy::default(),
        }
    }
}
