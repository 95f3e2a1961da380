//! ThinkBot core: pure chat controller state machine and view-model helpers.
mod effect;
mod endpoint;
mod msg;
mod state;
mod transcript;
mod update;
mod view_model;

pub use effect::{Effect, PROGRESS_TICK_PERIOD, SCROLL_SETTLE_DELAY, WELCOME_DELAY};
pub use endpoint::{Endpoint, ResponseType};
pub use msg::{Msg, RequestOutcome};
pub use state::{AppState, RequestId, SessionState, TimerId, Timestamp, DEFAULT_SEND_LABEL};
pub use transcript::{
    http_error_message, EntryKind, TranscriptEntry, EMPTY_INPUT_ERROR, INVALID_RESPONSE_ERROR,
    NETWORK_ERROR, TIMEOUT_ERROR, WELCOME_MESSAGE,
};
pub use update::update;
pub use view_model::{AppViewModel, BorderColor, EntryView, SendButtonView};
