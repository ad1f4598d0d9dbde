//! Pure rendering of view models to terminal output.
//!
//! Every function here is a function of already-built view models; nothing
//! in this module touches state or the network.

use chrono::NaiveDateTime;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use jobdeck_core::{
    DashboardViewModel, DetailViewModel, JobRowView, ListPhase, Notice, NoticeKind,
};
use jobdeck_engine::ParsedResult;

use super::constants::{
    lane_color, lane_label, tone_color, JOB_TABLE_HEADER, LANE_NAMES, LANE_TABLE_HEADER,
};

pub fn render_notice(notice: &Notice) -> String {
    match notice.kind {
        NoticeKind::Success => format!("✓ {}", notice.text),
        NoticeKind::Error => format!("✗ {}", notice.text),
    }
}

pub fn render_dashboard(view: &DashboardViewModel) -> String {
    let mut out = String::new();
    out.push_str("JOBDECK\n");

    match &view.phase {
        ListPhase::Loading => {
            out.push_str("Loading jobs…\n");
            return out;
        }
        ListPhase::Failed { message } => {
            out.push_str(&format!("Could not load jobs: {message}\n"));
            return out;
        }
        ListPhase::Ready => {}
    }

    let stats = &view.stats;
    out.push_str(&format!(
        "Jobs: {} total | {} pending | {} success | {} error | {}% success rate\n",
        stats.total,
        stats.pending,
        stats.success,
        stats.error,
        stats.success_rate()
    ));
    out.push_str(&format!(
        "Kinds: {} OS commands | {} crawls\n",
        stats.os_commands, stats.crawls
    ));
    if let Some(message) = &view.health_message {
        out.push_str(&format!("Backend: {message}\n"));
    }

    out.push_str("\nRecent jobs\n");
    out.push_str(&job_table(&view.recent).to_string());
    out.push('\n');
    out
}

pub fn render_history(view: &DashboardViewModel) -> String {
    let mut out = String::new();
    let stats = &view.stats;
    out.push_str(&format!(
        "Job history — {} total ({} success, {} error, {} pending)\n",
        stats.total, stats.success, stats.error, stats.pending
    ));
    out.push_str(&job_table(&view.rows).to_string());
    out.push('\n');
    out
}

pub fn render_status(view: &DashboardViewModel) -> String {
    let mut out = String::new();
    out.push_str("System status\n");

    let system = &view.system;
    let lanes = [
        system.api,
        system.database,
        system.queue,
        system.crawler,
    ];
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(LANE_TABLE_HEADER.to_vec());
    for (name, lane) in LANE_NAMES.iter().zip(lanes) {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(lane_label(lane)).fg(lane_color(lane)),
        ]);
    }
    out.push_str(&table.to_string());
    out.push('\n');

    if let Some(message) = &view.health_message {
        out.push_str(&format!("Backend: {message}\n"));
    }
    out
}

pub fn render_detail(view: &DetailViewModel, parsed: Option<&ParsedResult>) -> String {
    match view {
        DetailViewModel::Hidden => String::new(),
        DetailViewModel::Loading { job_id } => format!("Loading job #{job_id}…\n"),
        DetailViewModel::NotFound { job_id } => format!("Job #{job_id} not found\n"),
        DetailViewModel::Failed { job_id, message } => {
            format!("Could not load job #{job_id}: {message}\n")
        }
        DetailViewModel::Ready {
            job_id,
            kind,
            badge,
            created_at,
            updated_at,
            ..
        } => {
            let mut out = String::new();
            out.push_str(&format!(
                "Job #{job_id} — {} {}  [{} {}]\n",
                kind.glyph, kind.label, badge.glyph, badge.label
            ));
            out.push_str(&format!(
                "Created: {}  Updated: {}\n",
                format_timestamp(created_at.as_deref()),
                format_timestamp(updated_at.as_deref())
            ));
            if let Some(parsed) = parsed {
                out.push_str(&render_parsed(parsed));
            }
            out
        }
    }
}

fn render_parsed(parsed: &ParsedResult) -> String {
    let mut out = String::new();
    match parsed {
        ParsedResult::OsCommand(report) => {
            if let Some(command) = &report.command {
                out.push_str(&format!("Command: {command}\n"));
            }
            if let Some(output) = &report.output {
                out.push_str("Output:\n");
                out.push_str(output);
                out.push('\n');
            }
            if let Some(stderr) = report.stderr.as_ref().filter(|text| !text.is_empty()) {
                out.push_str(&format!("Stderr: {stderr}\n"));
            }
            if let Some(message) = &report.message {
                out.push_str(&format!("Message: {message}\n"));
            }
            if let Some(note) = &report.note {
                out.push_str(&format!("Note: {note}\n"));
            }
        }
        ParsedResult::Crawl(report) => {
            if let Some(target) = &report.target {
                out.push_str(&format!("Target: {target}\n"));
            }
            if let Some(count) = report.url_count {
                out.push_str(&format!("URLs found: {count}\n"));
            }
            if let Some(urls) = &report.urls {
                for url in urls {
                    out.push_str(&format!("  {url}\n"));
                }
            }
            if let Some(method) = &report.method {
                out.push_str(&format!("Method: {method}\n"));
            }
            if let Some(message) = &report.message {
                out.push_str(&format!("Message: {message}\n"));
            }
        }
        ParsedResult::Other(value) => {
            out.push_str(&serde_json::to_string_pretty(value).unwrap_or_default());
            out.push('\n');
        }
    }
    out
}

fn job_table(rows: &[JobRowView]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(JOB_TABLE_HEADER.to_vec());
    for row in rows {
        table.add_row(vec![
            Cell::new(row.job_id),
            Cell::new(format!("{} {}", row.kind.glyph, row.kind.label)),
            Cell::new(format!("{} {}", row.badge.glyph, row.badge.label))
                .fg(tone_color(row.badge.tone)),
            Cell::new(format_timestamp(row.created_at.as_deref())),
            Cell::new(format_timestamp(row.updated_at.as_deref())),
        ]);
    }
    table
}

/// Backend timestamps are naive ISO-8601; anything else renders raw and an
/// absent value renders as "N/A".
fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return "N/A".to_string();
    };
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(timestamp) => timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => raw.to_string(),
    }
}
