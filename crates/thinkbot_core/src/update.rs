use crate::transcript::{
    http_error_message, TranscriptEntry, EMPTY_INPUT_ERROR, INVALID_RESPONSE_ERROR, NETWORK_ERROR,
    TIMEOUT_ERROR,
};
use crate::{
    AppState, Effect, Endpoint, Msg, RequestOutcome, ResponseType, Timestamp, PROGRESS_TICK_PERIOD,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::EndpointSelected(value) => {
            // Only the placeholder follows the selector; an in-flight request keeps its endpoint.
            state.select_endpoint(Endpoint::from_selector(&value));
            Vec::new()
        }
        Msg::SendClicked { at } => submit(&mut state, at),
        Msg::ClearClicked { at } => {
            state.clear_transcript();
            state.push_entry(TranscriptEntry::welcome(at));
            vec![Effect::scroll_to_latest()]
        }
        Msg::WelcomeDue { at } => {
            state.push_entry(TranscriptEntry::welcome(at));
            vec![Effect::scroll_to_latest()]
        }
        Msg::ResponseReceived {
            request_id,
            outcome,
            at,
        } => {
            if state.session().in_flight != Some(request_id) {
                return (state, Vec::new());
            }
            let mut effects = Vec::with_capacity(2);
            if let Some(timer) = state.finish_request() {
                effects.push(Effect::StopProgressTimer { timer });
            }
            state.push_entry(entry_for_outcome(outcome, at));
            effects.push(Effect::scroll_to_latest());
            effects
        }
        Msg::ProgressTick { timer, at } => {
            state.apply_progress_tick(timer, at);
            Vec::new()
        }
        Msg::ScrollSettled => {
            state.scroll_to_latest();
            Vec::new()
        }
        Msg::ScrollBy(delta) => {
            state.scroll_by(delta);
            Vec::new()
        }
        Msg::TranscriptMeasured { max_scroll_back } => {
            state.set_scroll_limit(max_scroll_back);
            Vec::new()
        }
    };

    (state, effects)
}

fn submit(state: &mut AppState, at: Timestamp) -> Vec<Effect> {
    if state.is_loading() {
        return Vec::new();
    }

    let message = state.input().trim().to_owned();
    if message.is_empty() {
        state.push_entry(TranscriptEntry::error(EMPTY_INPUT_ERROR));
        return vec![Effect::scroll_to_latest()];
    }

    state.push_entry(TranscriptEntry::user(message.clone(), at));
    state.set_input(String::new());

    let endpoint = state.endpoint();
    let (request_id, timer) = state.begin_request(endpoint, at);

    let mut effects = Vec::with_capacity(3);
    if let Some(timer) = timer {
        effects.push(Effect::StartProgressTimer {
            timer,
            period: PROGRESS_TICK_PERIOD,
        });
    }
    effects.push(Effect::PostMessage {
        request_id,
        endpoint,
        message,
    });
    effects.push(Effect::scroll_to_latest());
    effects
}

fn entry_for_outcome(outcome: RequestOutcome, at: Timestamp) -> TranscriptEntry {
    match outcome {
        RequestOutcome::Reply {
            message,
            response_type,
        } => {
            let response_type = response_type.as_deref().and_then(ResponseType::from_tag);
            TranscriptEntry::assistant(message, response_type, at)
        }
        RequestOutcome::InvalidBody => TranscriptEntry::error(INVALID_RESPONSE_ERROR),
        RequestOutcome::HttpStatus { code, reason } => {
            TranscriptEntry::error(http_error_message(code, &reason))
        }
        RequestOutcome::Network => TranscriptEntry::error(NETWORK_ERROR),
        RequestOutcome::Timeout => TranscriptEntry::error(TIMEOUT_ERROR),
    }
}
