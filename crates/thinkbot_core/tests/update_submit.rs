use std::sync::Once;

use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use thinkbot_core::{
    update, AppState, Effect, Endpoint, EntryKind, Msg, DEFAULT_SEND_LABEL, EMPTY_INPUT_ERROR,
    PROGRESS_TICK_PERIOD, SCROLL_SETTLE_DELAY,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(thinkbot_logging::initialize_for_tests);
}

fn at(secs: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(12, 0, secs)
        .unwrap()
}

fn type_and_send(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::SendClicked { at: at(0) })
}

fn select(state: AppState, value: &str) -> AppState {
    update(state, Msg::EndpointSelected(value.to_string())).0
}

#[test]
fn submit_appends_user_entry_and_posts_once() {
    init_logging();
    let (mut state, effects) = type_and_send(AppState::new(), "  hello there  ");

    assert_eq!(
        effects,
        vec![
            Effect::PostMessage {
                request_id: 1,
                endpoint: Endpoint::Answer,
                message: "hello there".to_string(),
            },
            Effect::ScheduleScroll {
                delay: SCROLL_SETTLE_DELAY
            },
        ]
    );

    let transcript = state.transcript();
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript[0].kind, EntryKind::User);
    assert_eq!(transcript[0].body, "hello there");
    assert_eq!(transcript[0].timestamp, Some(at(0)));

    assert!(state.is_loading());
    assert_eq!(state.input(), "");
    let view = state.view();
    assert!(!view.send.enabled);
    assert!(view.send.spinner);
    assert_eq!(view.send.label, "Processing...");
    assert!(state.consume_dirty());
}

#[test]
fn empty_input_reports_error_without_request() {
    init_logging();
    let (state, effects) = type_and_send(AppState::new(), "   \t ");

    assert!(!effects
        .iter()
        .any(|effect| matches!(effect, Effect::PostMessage { .. })));
    assert_eq!(state.transcript().len(), 1);
    assert_eq!(state.transcript()[0].kind, EntryKind::Error);
    assert_eq!(state.transcript()[0].body, EMPTY_INPUT_ERROR);
    assert_eq!(state.transcript()[0].timestamp, None);
    assert!(!state.is_loading());
    assert_eq!(state.view().send.label, DEFAULT_SEND_LABEL);
}

#[test]
fn submit_while_busy_is_silent_noop() {
    init_logging();
    let (state, _) = type_and_send(AppState::new(), "first");
    let before_len = state.transcript().len();

    let (state, effects) = type_and_send(state, "second");

    assert!(effects.is_empty());
    assert_eq!(state.transcript().len(), before_len);
    assert_eq!(state.input(), "second");
    assert!(state.is_loading());
}

#[test]
fn empty_submit_while_busy_adds_nothing() {
    init_logging();
    let (state, _) = type_and_send(AppState::new(), "first");
    let (state, effects) = type_and_send(state, "");

    assert!(effects.is_empty());
    assert_eq!(state.transcript().len(), 1);
}

#[test]
fn selector_routes_requests_to_matching_endpoint() {
    init_logging();
    let cases = [
        ("search", Endpoint::Search),
        ("kbanswer", Endpoint::KbAnswer),
        ("answer", Endpoint::Answer),
        ("something-else", Endpoint::Answer),
    ];

    for (value, expected) in cases {
        let state = select(AppState::new(), value);
        let (_, effects) = type_and_send(state, "foo");
        let posted = effects
            .iter()
            .find_map(|effect| match effect {
                Effect::PostMessage {
                    endpoint, message, ..
                } => Some((*endpoint, message.clone())),
                _ => None,
            })
            .expect("post effect");
        assert_eq!(posted, (expected, "foo".to_string()), "selector {value}");
    }
    assert_eq!(Endpoint::Search.path(), "/search");
    assert_eq!(Endpoint::KbAnswer.path(), "/kbanswer");
    assert_eq!(Endpoint::Answer.path(), "/answer");
}

#[test]
fn knowledge_base_submit_starts_progress_timer() {
    init_logging();
    let state = select(AppState::new(), "kbanswer");
    let (state, effects) = type_and_send(state, "what is rust?");

    assert_eq!(
        effects[0],
        Effect::StartProgressTimer {
            timer: 1,
            period: PROGRESS_TICK_PERIOD,
        }
    );
    assert_eq!(state.session().progress_timer, Some(1));
    assert_eq!(state.session().request_started_at, Some(at(0)));
    assert_eq!(state.view().send.label, "Searching knowledge base...");
}

#[test]
fn general_chat_submit_has_no_timer() {
    init_logging();
    let (state, effects) = type_and_send(AppState::new(), "hi");

    assert!(!effects
        .iter()
        .any(|effect| matches!(effect, Effect::StartProgressTimer { .. })));
    assert_eq!(state.session().progress_timer, None);
}
