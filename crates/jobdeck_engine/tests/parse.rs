use pretty_assertions::assert_eq;
use serde_json::json;

use jobdeck_engine::{
    parse_job_result, parse_result_value, CrawlReport, OsCommandReport, ParsedResult,
    PARSE_FAILURE_MESSAGE,
};

#[test]
fn non_json_input_returns_the_exact_fallback_object() {
    for raw in ["not json", "{truncated", "", "\u{0}"] {
        let value = parse_result_value(Some(raw));
        assert_eq!(
            value,
            json!({ "status": "error", "message": "Failed to parse result" }),
            "input {raw:?} must degrade to the synthetic report"
        );
    }
}

#[test]
fn absent_input_returns_the_exact_fallback_object() {
    assert_eq!(
        parse_result_value(None),
        json!({ "status": "error", "message": PARSE_FAILURE_MESSAGE })
    );
}

#[test]
fn valid_json_round_trips_unchanged() {
    let samples = [
        json!({ "status": "success", "output": "root", "command": "whoami" }),
        json!({ "nested": { "a": [1, 2, 3], "b": null } }),
        json!([1, "two", false]),
        json!("just a string"),
        json!(42),
    ];
    for sample in samples {
        let raw = sample.to_string();
        assert_eq!(parse_result_value(Some(&raw)), sample);
    }
}

#[test]
fn os_command_success_payload_decodes_typed() {
    let raw = r#"{"status":"success","output":"total 0\ndrwxr-xr-x","command":"ls -la"}"#;
    match parse_job_result("os_command", Some(raw)) {
        ParsedResult::OsCommand(report) => {
            assert_eq!(report.status, "success");
            assert_eq!(report.command.as_deref(), Some("ls -la"));
            assert!(report.output.unwrap().starts_with("total 0"));
            assert_eq!(report.note, None);
        }
        other => panic!("expected an os_command report, got {other:?}"),
    }
}

#[test]
fn os_command_failure_payload_keeps_stderr() {
    let raw = r#"{"status":"error","message":"Command failed","stdout":"","stderr":"permission denied"}"#;
    match parse_job_result("os_command", Some(raw)) {
        ParsedResult::OsCommand(report) => {
            assert_eq!(report.status, "error");
            assert_eq!(report.stderr.as_deref(), Some("permission denied"));
        }
        other => panic!("expected an os_command report, got {other:?}"),
    }
}

#[test]
fn malformed_os_command_payload_degrades_to_the_error_report() {
    let parsed = parse_job_result("os_command", Some("{{{"));
    assert_eq!(
        parsed,
        ParsedResult::OsCommand(OsCommandReport {
            status: "error".to_string(),
            message: Some(PARSE_FAILURE_MESSAGE.to_string()),
            ..OsCommandReport::default()
        })
    );
    // Rendering leans on these two accessors on every path.
    assert_eq!(parsed.status(), "error");
    assert_eq!(parsed.message(), Some(PARSE_FAILURE_MESSAGE));
}

#[test]
fn crawl_payload_decodes_urls_and_count() {
    let raw = r#"{"status":"success","target":"https://example.com","url_count":2,"urls":["https://example.com/","https://example.com/about"],"method":"katana"}"#;
    match parse_job_result("katana_crawl", Some(raw)) {
        ParsedResult::Crawl(report) => {
            assert_eq!(report.url_count, Some(2));
            assert_eq!(report.urls.as_ref().map(Vec::len), Some(2));
            assert_eq!(report.target.as_deref(), Some("https://example.com"));
        }
        other => panic!("expected a crawl report, got {other:?}"),
    }
}

#[test]
fn absent_crawl_payload_degrades_to_the_error_report() {
    assert_eq!(
        parse_job_result("katana_crawl", None),
        ParsedResult::Crawl(CrawlReport {
            status: "error".to_string(),
            message: Some(PARSE_FAILURE_MESSAGE.to_string()),
            ..CrawlReport::default()
        })
    );
}

#[test]
fn unknown_job_kind_keeps_the_raw_value() {
    let raw = r#"{"status":"success","custom":true}"#;
    match parse_job_result("nmap_scan", Some(raw)) {
        ParsedResult::Other(value) => {
            assert_eq!(value, json!({ "status": "success", "custom": true }));
        }
        other => panic!("expected a raw value, got {other:?}"),
    }
}

#[test]
fn error_payload_message_is_reachable_for_rendering() {
    let parsed = parse_job_result(
        "os_command",
        Some(r#"{"status":"error","message":"boom"}"#),
    );
    assert_eq!(parsed.status(), "error");
    assert_eq!(parsed.message(), Some("boom"));
}
