use jobdeck_core::{
    update, AppState, HealthLane, JobKind, JobSnapshot, JobStatus, ListPhase, Msg, Tone,
};

fn row(id: i64, kind: JobKind, status: JobStatus) -> JobSnapshot {
    JobSnapshot {
        id,
        kind,
        status,
        result: None,
        created_at: Some(format!("2026-08-06T10:00:{id:02}")),
        updated_at: None,
    }
}

#[test]
fn list_loaded_replaces_snapshot_and_orders_rows() {
    deck_logging::initialize_for_tests();
    let state = AppState::new();
    let rows = vec![
        row(3, JobKind::KatanaCrawl, JobStatus::Pending),
        row(1, JobKind::OsCommand, JobStatus::Success),
        row(2, JobKind::OsCommand, JobStatus::Error),
    ];

    let (mut state, effects) = update(state, Msg::JobListLoaded(rows));
    assert!(effects.is_empty());
    assert!(state.consume_dirty());

    let view = state.view();
    assert_eq!(view.phase, ListPhase::Ready);

    // BTreeMap iteration yields deterministic ascending id order.
    let ids: Vec<_> = view.rows.iter().map(|r| r.job_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    assert_eq!(view.stats.total, 3);
    assert_eq!(view.stats.pending, 1);
    assert_eq!(view.stats.success, 1);
    assert_eq!(view.stats.error, 1);
    assert_eq!(view.stats.os_commands, 2);
    assert_eq!(view.stats.crawls, 1);
    assert_eq!(view.stats.success_rate(), 33);
}

#[test]
fn list_loaded_swaps_wholesale() {
    let state = AppState::new();
    let (state, _) = update(
        state,
        Msg::JobListLoaded(vec![
            row(1, JobKind::OsCommand, JobStatus::Success),
            row(2, JobKind::OsCommand, JobStatus::Pending),
        ]),
    );

    // A row removed server-side disappears from the next snapshot.
    let (mut state, _) = update(
        state,
        Msg::JobListLoaded(vec![row(2, JobKind::OsCommand, JobStatus::Success)]),
    );

    let view = state.view();
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].job_id, 2);
    assert_eq!(view.rows[0].badge.tone, Tone::Success);
    assert!(state.consume_dirty());
}

#[test]
fn recent_panel_shows_newest_first_capped_at_five() {
    let state = AppState::new();
    let rows = (1..=8)
        .map(|id| row(id, JobKind::OsCommand, JobStatus::Success))
        .collect();

    let (mut state, _) = update(state, Msg::JobListLoaded(rows));
    let view = state.view();

    let recent_ids: Vec<_> = view.recent.iter().map(|r| r.job_id).collect();
    assert_eq!(recent_ids, vec![8, 7, 6, 5, 4]);
}

#[test]
fn list_failure_degrades_health_lanes() {
    let state = AppState::new();
    let (mut state, effects) = update(
        state,
        Msg::JobListFailed {
            message: "connection refused".to_string(),
        },
    );
    assert!(effects.is_empty());

    let view = state.view();
    assert_eq!(
        view.phase,
        ListPhase::Failed {
            message: "connection refused".to_string()
        }
    );
    assert_eq!(view.system.database, HealthLane::Offline);
    assert_eq!(view.system.queue, HealthLane::Offline);
}

#[test]
fn health_probe_drives_api_lane() {
    let state = AppState::new();
    assert_eq!(state.view().system.api, HealthLane::Checking);

    let (state, _) = update(
        state,
        Msg::HealthChecked {
            message: "Jobdeck backend is running".to_string(),
        },
    );
    let view = state.view();
    assert_eq!(view.system.api, HealthLane::Online);
    assert_eq!(
        view.health_message.as_deref(),
        Some("Jobdeck backend is running")
    );

    let (state, _) = update(
        state,
        Msg::HealthUnreachable {
            message: "timed out".to_string(),
        },
    );
    assert_eq!(state.view().system.api, HealthLane::Offline);
}

#[test]
fn crawler_lane_needs_a_successful_crawl() {
    let state = AppState::new();
    let (state, _) = update(
        state,
        Msg::JobListLoaded(vec![row(1, JobKind::KatanaCrawl, JobStatus::Error)]),
    );
    assert_eq!(state.view().system.crawler, HealthLane::Offline);

    let (state, _) = update(
        state,
        Msg::JobListLoaded(vec![
            row(1, JobKind::KatanaCrawl, JobStatus::Error),
            row(2, JobKind::KatanaCrawl, JobStatus::Success),
        ]),
    );
    assert_eq!(state.view().system.crawler, HealthLane::Online);
}
