use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use serde_json::Value;

use crate::{ChatReply, ChatRequest, FailureKind, RequestError};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
/// Reason reported for status codes without a registered phrase.
pub const UNKNOWN_STATUS_REASON: &str = "Unknown Status";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Ceiling for the whole exchange; knowledge-base answers can take close to a minute.
    pub request_timeout: Duration,
    pub max_body_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            max_body_bytes: 4 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait ChatClient: Send + Sync {
    /// POSTs `message` to `path` (e.g. `/kbanswer`) and parses the reply.
    async fn post_message(&self, path: &str, message: &str) -> Result<ChatReply, RequestError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestChatClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestChatClient {
    pub fn new(settings: ClientSettings) -> Result<Self, RequestError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| RequestError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn endpoint_url(&self, path: &str) -> Result<Url, RequestError> {
        let base = self.settings.base_url.trim_end_matches('/');
        Url::parse(&format!("{base}{path}"))
            .map_err(|err| RequestError::new(FailureKind::Network, format!("bad url: {err}")))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, RequestError> {
        let max_bytes = self.settings.max_body_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(RequestError::new(
                    FailureKind::InvalidBody,
                    format!("response too large ({content_len} > {max_bytes} bytes)"),
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(RequestError::new(
                    FailureKind::InvalidBody,
                    format!("response too large (>{max_bytes} bytes)"),
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl ChatClient for ReqwestChatClient {
    async fn post_message(&self, path: &str, message: &str) -> Result<ChatReply, RequestError> {
        let url = self.endpoint_url(path)?;
        let body = serde_json::to_vec(&ChatRequest { message })
            .map_err(|err| RequestError::new(FailureKind::Network, err.to_string()))?;

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(RequestError::new(
                FailureKind::HttpStatus {
                    code: status.as_u16(),
                    reason: status
                        .canonical_reason()
                        .unwrap_or(UNKNOWN_STATUS_REASON)
                        .to_string(),
                },
                status.to_string(),
            ));
        }

        let bytes = self.read_body(response).await?;
        parse_reply(&bytes)
    }
}

/// Accepts any JSON object whose `message` is a string. A non-string
/// `response_type` is treated as missing.
pub(crate) fn parse_reply(bytes: &[u8]) -> Result<ChatReply, RequestError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|err| RequestError::new(FailureKind::InvalidBody, err.to_string()))?;

    let message = value
        .get("message")
        .and_then(Value::as_str)
        .ok_or_else(|| RequestError::new(FailureKind::InvalidBody, "missing string `message`"))?;
    let response_type = value
        .get("response_type")
        .and_then(Value::as_str)
        .map(ToOwned::to_owned);

    Ok(ChatReply {
        message: message.to_string(),
        response_type,
    })
}

fn map_reqwest_error(err: reqwest::Error) -> RequestError {
    if err.is_timeout() {
        return RequestError::new(FailureKind::Timeout, err.to_string());
    }
    RequestError::new(FailureKind::Network, err.to_string())
}
