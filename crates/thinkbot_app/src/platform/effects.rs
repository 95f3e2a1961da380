use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use thinkbot_client::{
    ChatReply, ClientSettings, EngineError, EngineEvent, EngineHandle, FailureKind,
    Html2TextRenderer, MarkupRenderer, RequestError,
};
use thinkbot_core::{Effect, Msg, RequestOutcome, Timestamp};
use thinkbot_logging::{tb_debug, tb_info, tb_warn};

/// Local wall-clock time, the only clock the controller sees.
pub fn now() -> Timestamp {
    chrono::Local::now().naive_local()
}

pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings, msg_tx: mpsc::Sender<Msg>) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(settings)?;
        let runner = Self { engine, msg_tx };
        runner.spawn_event_loop();
        Ok(runner)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::PostMessage {
                    request_id,
                    endpoint,
                    message,
                } => {
                    tb_info!(
                        "PostMessage request_id={} path={} message_len={}",
                        request_id,
                        endpoint.path(),
                        message.len()
                    );
                    self.engine.post(request_id, endpoint.path(), message);
                }
                Effect::StartProgressTimer { timer, period } => {
                    self.engine.start_timer(timer, period);
                }
                Effect::StopProgressTimer { timer } => {
                    self.engine.stop_timer(timer);
                }
                Effect::ScheduleScroll { delay } => {
                    self.schedule(delay, || Msg::ScrollSettled);
                }
            }
        }
    }

    pub fn shutdown(&self) {
        self.engine.shutdown();
    }

    /// Sends the message built by `make` once `delay` has passed.
    pub fn schedule<F>(&self, delay: Duration, make: F)
    where
        F: FnOnce() -> Msg + Send + 'static,
    {
        let msg_tx = self.msg_tx.clone();
        thread::spawn(move || {
            thread::sleep(delay);
            let _ = msg_tx.send(make());
        });
    }

    fn spawn_event_loop(&self) {
        let engine = self.engine.clone();
        let msg_tx = self.msg_tx.clone();
        thread::spawn(move || {
            let renderer = Html2TextRenderer;
            while let Some(event) = engine.recv() {
                let msg = match event {
                    EngineEvent::ReplyCompleted { request_id, result } => {
                        Msg::ResponseReceived {
                            request_id,
                            outcome: map_outcome(result, &renderer),
                            at: now(),
                        }
                    }
                    EngineEvent::TimerFired { timer } => {
                        tb_debug!("Progress tick timer={}", timer);
                        Msg::ProgressTick { timer, at: now() }
                    }
                };
                if msg_tx.send(msg).is_err() {
                    break;
                }
            }
        });
    }
}

fn map_outcome(
    result: Result<ChatReply, RequestError>,
    renderer: &dyn MarkupRenderer,
) -> RequestOutcome {
    match result {
        Ok(reply) => RequestOutcome::Reply {
            message: renderer.to_display_text(&reply.message),
            response_type: reply.response_type,
        },
        Err(err) => {
            tb_warn!("Request failed: {}", err);
            match err.kind {
                FailureKind::InvalidBody => RequestOutcome::InvalidBody,
                FailureKind::HttpStatus { code, reason } => {
                    RequestOutcome::HttpStatus { code, reason }
                }
                FailureKind::Timeout => RequestOutcome::Timeout,
                FailureKind::Network => RequestOutcome::Network,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(kind: FailureKind) -> Result<ChatReply, RequestError> {
        Err(RequestError {
            kind,
            message: "boom".to_string(),
        })
    }

    #[test]
    fn replies_are_converted_for_display() {
        let outcome = map_outcome(
            Ok(ChatReply {
                message: "<b>bold</b>\u{1b}".to_string(),
                response_type: Some("knowledge_base".to_string()),
            }),
            &Html2TextRenderer,
        );
        match outcome {
            RequestOutcome::Reply {
                message,
                response_type,
            } => {
                assert!(message.contains("bold"));
                assert!(!message.contains('<'));
                assert!(!message.contains('\u{1b}'));
                assert_eq!(response_type.as_deref(), Some("knowledge_base"));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn failures_map_one_to_one() {
        let renderer = Html2TextRenderer;
        assert_eq!(
            map_outcome(failure(FailureKind::InvalidBody), &renderer),
            RequestOutcome::InvalidBody
        );
        assert_eq!(
            map_outcome(failure(FailureKind::Timeout), &renderer),
            RequestOutcome::Timeout
        );
        assert_eq!(
            map_outcome(failure(FailureKind::Network), &renderer),
            RequestOutcome::Network
        );
        assert_eq!(
            map_outcome(
                failure(FailureKind::HttpStatus {
                    code: 503,
                    reason: "Service Unavailable".to_string(),
                }),
                &renderer
            ),
            RequestOutcome::HttpStatus {
                code: 503,
                reason: "Service Unavailable".to_string(),
            }
        );
    }
}
