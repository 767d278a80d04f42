use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde_json::Value;

/// Raw reply captured from the webhook receiver before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookReply {
    pub status: u16,
    pub status_text: String,
    pub content_type: Option<String>,
    pub body: String,
}

/// Network-level failure; the receiver never produced a status line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Outbound seam so the gateway can be exercised without a live receiver.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    async fn post_json(&self, url: &Url, payload: &Value) -> Result<WebhookReply, TransportError>;
}

/// `reqwest`-backed transport. No timeout is configured; the runtime defaults apply.
#[derive(Debug, Clone, Default)]
pub struct HttpWebhookTransport {
    client: reqwest::Client,
}

impl HttpWebhookTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WebhookTransport for HttpWebhookTransport {
    async fn post_json(&self, url: &Url, payload: &Value) -> Result<WebhookReply, TransportError> {
        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
            .json(payload)
            .send()
            .await
            .map_err(|err| TransportError::new(err.to_string()))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response
            .text()
            .await
            .map_err(|err| TransportError::new(err.to_string()))?;

        Ok(WebhookReply {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            content_type,
            body,
        })
    }
}
