use crate::{ResponseType, Timestamp};

pub const WELCOME_MESSAGE: &str = "Hello! I'm ThinkBot, your AI assistant. How can I help you today? You can ask me general questions or use the dropdown to access specific features.";

pub const EMPTY_INPUT_ERROR: &str = "Please enter a message";
pub const INVALID_RESPONSE_ERROR: &str = "Invalid response from server";
pub const NETWORK_ERROR: &str = "Network error. Please check your connection.";
pub const TIMEOUT_ERROR: &str = "Request timeout. Knowledge base queries can take up to 60 seconds. Please try again or ask a simpler question.";

pub fn http_error_message(code: u16, reason: &str) -> String {
    format!("Error: {code} - {reason}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    User,
    Assistant(Option<ResponseType>),
    /// Inline, non-fatal failure notice.
    Error,
}

/// One rendered chat turn. Error entries carry no timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub kind: EntryKind,
    pub body: String,
    pub timestamp: Option<Timestamp>,
}

impl TranscriptEntry {
    pub fn user(body: impl Into<String>, at: Timestamp) -> Self {
        Self {
            kind: EntryKind::User,
            body: body.into(),
            timestamp: Some(at),
        }
    }

    pub fn assistant(
        body: impl Into<String>,
        response_type: Option<ResponseType>,
        at: Timestamp,
    ) -> Self {
        Self {
            kind: EntryKind::Assistant(response_type),
            body: body.into(),
            timestamp: Some(at),
        }
    }

    pub fn error(body: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Error,
            body: body.into(),
            timestamp: None,
        }
    }

    pub fn welcome(at: Timestamp) -> Self {
        Self::assistant(WELCOME_MESSAGE, Some(ResponseType::Chatbot), at)
    }

    pub fn is_error(&self) -> bool {
        self.kind == EntryKind::Error
    }
}
