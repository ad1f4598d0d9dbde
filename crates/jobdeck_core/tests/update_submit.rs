use jobdeck_core::{
    update, AppState, CommandKey, Effect, JobKind, JobSubmission, Msg, NoticeKind,
};

#[test]
fn valid_command_key_emits_submit_effect() {
    let state = AppState::new();
    let (mut state, effects) = update(
        state,
        Msg::SubmitOsCommand {
            command_key: "whoami".to_string(),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::SubmitJob {
            submission: JobSubmission::OsCommand {
                command_key: CommandKey::Whoami
            }
        }]
    );
    assert!(state.take_notices().is_empty());
}

#[test]
fn empty_command_key_is_rejected_before_any_effect() {
    let state = AppState::new();
    let (mut state, effects) = update(
        state,
        Msg::SubmitOsCommand {
            command_key: "  ".to_string(),
        },
    );

    assert!(effects.is_empty());
    let notices = state.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Error);
    assert_eq!(notices[0].text, "Please select a command");
}

#[test]
fn unknown_command_key_is_rejected_with_whitelist() {
    let state = AppState::new();
    let (mut state, effects) = update(
        state,
        Msg::SubmitOsCommand {
            command_key: "rm".to_string(),
        },
    );

    assert!(effects.is_empty());
    let notices = state.take_notices();
    assert_eq!(
        notices[0].text,
        "Invalid command_key 'rm'. Available: list, current_dir, whoami"
    );
}

#[test]
fn valid_crawl_url_emits_submit_effect() {
    let state = AppState::new();
    let (_, effects) = update(
        state,
        Msg::SubmitCrawl {
            url: " https://example.com ".to_string(),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::SubmitJob {
            submission: JobSubmission::KatanaCrawl {
                url: "https://example.com".to_string()
            }
        }]
    );
}

#[test]
fn malformed_crawl_url_never_reaches_the_wire() {
    let state = AppState::new();
    let (mut state, effects) = update(
        state,
        Msg::SubmitCrawl {
            url: "not-a-url".to_string(),
        },
    );

    assert!(effects.is_empty());
    let notices = state.take_notices();
    assert_eq!(notices[0].kind, NoticeKind::Error);
    assert_eq!(
        notices[0].text,
        "Please enter a valid URL (include http:// or https://)"
    );
}

#[test]
fn empty_crawl_url_is_rejected() {
    let state = AppState::new();
    let (mut state, effects) = update(
        state,
        Msg::SubmitCrawl {
            url: String::new(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.take_notices()[0].text, "Please enter a URL to crawl");
}

#[test]
fn submitted_notice_carries_the_task_id() {
    let state = AppState::new();
    let (mut state, effects) = update(
        state,
        Msg::JobSubmitted {
            kind: JobKind::OsCommand,
            task_id: "ab12-cd34".to_string(),
        },
    );

    assert!(effects.is_empty());
    let notices = state.take_notices();
    assert_eq!(notices[0].kind, NoticeKind::Success);
    assert!(notices[0].text.contains("ab12-cd34"));
}

#[test]
fn submit_failure_prefers_the_server_message() {
    let state = AppState::new();
    let (mut state, _) = update(
        state,
        Msg::JobSubmitFailed {
            kind: JobKind::KatanaCrawl,
            message: Some("queue is full".to_string()),
        },
    );
    assert_eq!(state.take_notices()[0].text, "queue is full");
}

#[test]
fn submit_failure_falls_back_to_a_generic_message() {
    let state = AppState::new();
    let (mut state, _) = update(
        state,
        Msg::JobSubmitFailed {
            kind: JobKind::KatanaCrawl,
            message: None,
        },
    );
    assert_eq!(state.take_notices()[0].text, "Failed to create crawler job");
}
