//! Relay of inquiry payloads to the downstream webhook.
//!
//! The gateway stamps each payload, hands it to a [`WebhookTransport`], and folds the
//! receiver's reply into a [`WebhookBody`] or an [`UpstreamError`]. Nothing is retried.

mod gateway;
mod response;
mod transport;

pub use gateway::SubmissionGateway;
pub use response::{classify, UpstreamError, WebhookBody, EMPTY_BODY_MESSAGE};
pub use transport::{HttpWebhookTransport, TransportError, WebhookReply, WebhookTransport};
