use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use reqwest::Url;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::response::{classify, UpstreamError, WebhookBody};
use super::transport::WebhookTransport;

/// Relays normalized inquiry payloads to the configured webhook.
pub struct SubmissionGateway<T> {
    transport: Arc<T>,
    webhook_url: Url,
}

impl<T> SubmissionGateway<T>
where
    T: WebhookTransport + 'static,
{
    pub fn new(transport: Arc<T>, webhook_url: Url) -> Self {
        Self {
            transport,
            webhook_url,
        }
    }

    /// Stamp the payload with the relay time and deliver it.
    pub async fn submit(&self, payload: Map<String, Value>) -> Result<WebhookBody, UpstreamError> {
        let stamped = Value::Object(stamp(payload));

        let reply = match self.transport.post_json(&self.webhook_url, &stamped).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(url = %self.webhook_url, error = %err, "webhook unreachable");
                return Err(err.into());
            }
        };

        debug!(status = reply.status, "webhook replied");
        classify(reply)
    }
}

/// Layer `timestamp` over the payload; every other key is left as submitted.
fn stamp(mut payload: Map<String, Value>) -> Map<String, Value> {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    payload.insert("timestamp".to_string(), Value::String(now));
    payload
}
