use std::fmt;

use serde::Serialize;
use thiserror::Error;

pub type RequestId = u64;
pub type TimerId = u64;

/// Body of every POST: `{"message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub message: String,
    pub response_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ReplyCompleted {
        request_id: RequestId,
        result: Result<ChatReply, RequestError>,
    },
    TimerFired { timer: TimerId },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct RequestError {
    pub kind: FailureKind,
    pub message: String,
}

impl RequestError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Status 200 but the body was not a JSON object with a string `message`.
    InvalidBody,
    HttpStatus { code: u16, reason: String },
    Timeout,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidBody => write!(f, "invalid response body"),
            FailureKind::HttpStatus { code, reason } => write!(f, "http status {code} {reason}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
