//! ThinkBot client: HTTP engine, timers, and reply post-processing.
mod client;
mod engine;
mod markup;
mod types;

pub use client::{
    ChatClient, ClientSettings, ReqwestChatClient, DEFAULT_BASE_URL, UNKNOWN_STATUS_REASON,
};
pub use engine::{EngineError, EngineHandle};
pub use markup::{Html2TextRenderer, MarkupRenderer};
pub use types::{ChatReply, ChatRequest, EngineEvent, FailureKind, RequestError, RequestId, TimerId};
