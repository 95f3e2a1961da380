use std::time::Duration;

use crate::{Endpoint, RequestId, TimerId};

/// Period of the elapsed-seconds counter shown while a knowledge-base request runs.
pub const PROGRESS_TICK_PERIOD: Duration = Duration::from_secs(1);
/// Delay before the transcript is pinned to its newest entry, so layout settles first.
pub const SCROLL_SETTLE_DELAY: Duration = Duration::from_millis(100);
/// Delay between startup and the automatic welcome message.
pub const WELCOME_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST `{"message": message}` to the endpoint's path.
    PostMessage {
        request_id: RequestId,
        endpoint: Endpoint,
        message: String,
    },
    StartProgressTimer { timer: TimerId, period: Duration },
    StopProgressTimer { timer: TimerId },
    /// Answer with `Msg::ScrollSettled` once `delay` has passed.
    ScheduleScroll { delay: Duration },
}

impl Effect {
    pub(crate) fn scroll_to_latest() -> Self {
        Effect::ScheduleScroll {
            delay: SCROLL_SETTLE_DELAY,
        }
    }
}
