use crate::{RequestId, TimerId, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the message input.
    InputChanged(String),
    /// User picked a value in the endpoint selector (raw selector value).
    EndpointSelected(String),
    /// User clicked Send or pressed Enter.
    SendClicked { at: Timestamp },
    /// User clicked Clear.
    ClearClicked { at: Timestamp },
    /// Startup delay elapsed; show the welcome message.
    WelcomeDue { at: Timestamp },
    /// Terminal outcome of a dispatched request.
    ResponseReceived {
        request_id: RequestId,
        outcome: RequestOutcome,
        at: Timestamp,
    },
    /// Progress timer fired.
    ProgressTick { timer: TimerId, at: Timestamp },
    /// Deferred scroll requested by `Effect::ScheduleScroll` is due.
    ScrollSettled,
    /// User scrolled the transcript; positive values move back in history.
    ScrollBy(i32),
    /// The renderer laid out the transcript; `max_scroll_back` is how far the
    /// view can move back before the oldest line reaches the top.
    TranscriptMeasured { max_scroll_back: u16 },
}

/// How a request ended, as observed by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    Reply {
        message: String,
        response_type: Option<String>,
    },
    /// HTTP 200 whose body was not the expected JSON.
    InvalidBody,
    HttpStatus { code: u16, reason: String },
    Network,
    Timeout,
}
