use crate::transcript::TranscriptEntry;
use crate::view_model::{AppViewModel, EntryView, SendButtonView};
use crate::Endpoint;

pub type RequestId = u64;
pub type TimerId = u64;
/// Local wall-clock reading supplied by the runtime.
pub type Timestamp = chrono::NaiveDateTime;

pub const DEFAULT_SEND_LABEL: &str = "Send";

/// Busy-state bookkeeping. `is_loading` guards against a second request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub is_loading: bool,
    pub progress_timer: Option<TimerId>,
    pub request_started_at: Option<Timestamp>,
    pub in_flight: Option<RequestId>,
    pub elapsed_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SendControl {
    label: String,
    enabled: bool,
    spinner: bool,
    saved_label: Option<String>,
}

impl Default for SendControl {
    fn default() -> Self {
        Self {
            label: DEFAULT_SEND_LABEL.to_string(),
            enabled: true,
            spinner: false,
            saved_label: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: String,
    endpoint: Endpoint,
    transcript: Vec<TranscriptEntry>,
    session: SessionState,
    send: SendControl,
    busy_label: &'static str,
    scroll_back: u16,
    /// Last measured scroll limit; `None` until the first layout.
    scroll_limit: Option<u16>,
    next_request_id: RequestId,
    next_timer_id: TimerId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            entries: self.transcript.iter().map(EntryView::from_entry).collect(),
            input: self.input.clone(),
            placeholder: self.endpoint.placeholder(),
            endpoint: self.endpoint,
            send: SendButtonView {
                label: self.send.label.clone(),
                enabled: self.send.enabled,
                spinner: self.send.spinner,
            },
            scroll_back: self.scroll_back,
        }
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn is_loading(&self) -> bool {
        self.session.is_loading
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.dirty = true;
        }
    }

    pub(crate) fn select_endpoint(&mut self, endpoint: Endpoint) {
        if self.endpoint != endpoint {
            self.endpoint = endpoint;
            self.dirty = true;
        }
    }

    pub(crate) fn push_entry(&mut self, entry: TranscriptEntry) {
        self.transcript.push(entry);
        self.dirty = true;
    }

    pub(crate) fn clear_transcript(&mut self) {
        self.transcript.clear();
        self.scroll_back = 0;
        self.dirty = true;
    }

    /// Enters the busy state. Returns the new request id and, for endpoints
    /// that show elapsed time, the id of the progress timer to start.
    pub(crate) fn begin_request(
        &mut self,
        endpoint: Endpoint,
        at: Timestamp,
    ) -> (RequestId, Option<TimerId>) {
        self.next_request_id += 1;
        let request_id = self.next_request_id;

        let timer = if endpoint.tracks_elapsed() {
            self.next_timer_id += 1;
            Some(self.next_timer_id)
        } else {
            None
        };

        self.session = SessionState {
            is_loading: true,
            progress_timer: timer,
            request_started_at: Some(at),
            in_flight: Some(request_id),
            elapsed_secs: 0,
        };

        self.busy_label = endpoint.busy_label();
        let original = std::mem::replace(&mut self.send.label, self.busy_label.to_string());
        self.send.saved_label = Some(original);
        self.send.enabled = false;
        self.send.spinner = true;
        self.dirty = true;

        (request_id, timer)
    }

    /// Leaves the busy state. Returns the progress timer that must be stopped, if any.
    pub(crate) fn finish_request(&mut self) -> Option<TimerId> {
        let timer = self.session.progress_timer.take();
        self.session = SessionState::default();

        self.send.label = self
            .send
            .saved_label
            .take()
            .unwrap_or_else(|| DEFAULT_SEND_LABEL.to_string());
        self.send.enabled = true;
        self.send.spinner = false;
        self.dirty = true;

        timer
    }

    /// Applies a progress tick. Ticks from a timer that is no longer current are ignored.
    pub(crate) fn apply_progress_tick(&mut self, timer: TimerId, at: Timestamp) -> bool {
        if !self.session.is_loading || self.session.progress_timer != Some(timer) {
            return false;
        }
        let Some(started) = self.session.request_started_at else {
            return false;
        };

        let elapsed = (at - started).num_seconds().max(0) as u64;
        let elapsed = elapsed.max(self.session.elapsed_secs);
        self.session.elapsed_secs = elapsed;

        let label = format!("{} ({}s)", self.busy_label, elapsed);
        if self.send.label != label {
            self.send.label = label;
            self.dirty = true;
        }
        true
    }

    pub(crate) fn scroll_to_latest(&mut self) {
        if self.scroll_back != 0 {
            self.scroll_back = 0;
            self.dirty = true;
        }
    }

    pub(crate) fn scroll_by(&mut self, delta: i32) {
        let limit = i32::from(self.scroll_limit.unwrap_or(u16::MAX));
        let next = (i32::from(self.scroll_back) + delta).clamp(0, limit) as u16;
        self.set_scroll_back(next);
    }

    pub(crate) fn set_scroll_limit(&mut self, limit: u16) {
        self.scroll_limit = Some(limit);
        if self.scroll_back > limit {
            self.set_scroll_back(limit);
        }
    }

    fn set_scroll_back(&mut self, next: u16) {
        if next != self.scroll_back {
            self.scroll_back = next;
            self.dirty = true;
        }
    }
}
