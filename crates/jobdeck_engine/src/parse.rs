use deck_logging::deck_warn;
use serde::Deserialize;
use serde_json::{json, Value};

/// Message carried by the synthetic report when a payload cannot be decoded.
pub const PARSE_FAILURE_MESSAGE: &str = "Failed to parse result";

/// Decodes a job's opaque `result` field.
///
/// Total function: for any valid JSON string the decoded value is returned
/// unchanged; for a malformed or absent payload the synthetic
/// `{ "status": "error", "message": "Failed to parse result" }` object is
/// returned instead. Rendering code relies on `status` always being
/// present, so this never raises.
pub fn parse_result_value(raw: Option<&str>) -> Value {
    match raw {
        Some(text) => serde_json::from_str(text).unwrap_or_else(|err| {
            deck_warn!("Failed to parse job result: {err}");
            failure_value()
        }),
        None => failure_value(),
    }
}

fn failure_value() -> Value {
    json!({ "status": "error", "message": PARSE_FAILURE_MESSAGE })
}

/// Decoded `result` of an `os_command` job. `stdout` and `note` appear on
/// command failure and shell-fallback success respectively.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct OsCommandReport {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl OsCommandReport {
    fn parse_failure() -> Self {
        Self {
            status: "error".to_string(),
            message: Some(PARSE_FAILURE_MESSAGE.to_string()),
            ..Self::default()
        }
    }
}

/// Decoded `result` of a `katana_crawl` job.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct CrawlReport {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub url_count: Option<u64>,
    #[serde(default)]
    pub urls: Option<Vec<String>>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
}

impl CrawlReport {
    fn parse_failure() -> Self {
        Self {
            status: "error".to_string(),
            message: Some(PARSE_FAILURE_MESSAGE.to_string()),
            ..Self::default()
        }
    }
}

/// A `result` payload decoded per job kind. Unknown kinds keep the raw
/// decoded value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedResult {
    OsCommand(OsCommandReport),
    Crawl(CrawlReport),
    Other(Value),
}

impl ParsedResult {
    /// The payload's own status label; present even on the fallback path.
    pub fn status(&self) -> &str {
        match self {
            ParsedResult::OsCommand(report) => &report.status,
            ParsedResult::Crawl(report) => &report.status,
            ParsedResult::Other(value) => value
                .get("status")
                .and_then(Value::as_str)
                .unwrap_or_default(),
        }
    }

    /// The payload's human message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            ParsedResult::OsCommand(report) => report.message.as_deref(),
            ParsedResult::Crawl(report) => report.message.as_deref(),
            ParsedResult::Other(value) => value.get("message").and_then(Value::as_str),
        }
    }
}

/// Decodes `result` into the typed shape for `job_name`. Total like
/// [`parse_result_value`]: malformed payloads degrade to the synthetic
/// error report, never an `Err`.
pub fn parse_job_result(job_name: &str, raw: Option<&str>) -> ParsedResult {
    match job_name {
        "os_command" => ParsedResult::OsCommand(
            raw.and_then(|text| serde_json::from_str(text).ok())
                .unwrap_or_else(OsCommandReport::parse_failure),
        ),
        "katana_crawl" => ParsedResult::Crawl(
            raw.and_then(|text| serde_json::from_str(text).ok())
                .unwrap_or_else(CrawlReport::parse_failure),
        ),
        _ => ParsedResult::Other(parse_result_value(raw)),
    }
}
