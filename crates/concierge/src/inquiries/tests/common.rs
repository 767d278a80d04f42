use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use reqwest::Url;
use serde_json::{Map, Value};

use crate::content::{ContentClient, ContentStore, ContentStoreError, ItemQuery};
use crate::inquiries::{inquiry_router, InquiryService};
use crate::webhook::{SubmissionGateway, TransportError, WebhookReply, WebhookTransport};

pub(super) const WEBHOOK_URL: &str = "https://hooks.example.com/concierge";

/// Transport double replaying one scripted outcome and recording every payload.
pub(super) struct RecordingTransport {
    outcome: Result<WebhookReply, TransportError>,
    payloads: Mutex<Vec<Value>>,
}

impl RecordingTransport {
    pub(super) fn replying(status: u16, content_type: Option<&str>, body: &str) -> Self {
        let status_text = match status {
            200 => "OK",
            500 => "Internal Server Error",
            503 => "Service Unavailable",
            _ => "",
        };
        Self {
            outcome: Ok(WebhookReply {
                status,
                status_text: status_text.to_string(),
                content_type: content_type.map(str::to_owned),
                body: body.to_string(),
            }),
            payloads: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn empty_ok() -> Self {
        Self::replying(200, None, "")
    }

    pub(super) fn unreachable(message: &str) -> Self {
        Self {
            outcome: Err(TransportError::new(message)),
            payloads: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn payloads(&self) -> Vec<Value> {
        self.payloads.lock().expect("payload mutex poisoned").clone()
    }
}

#[async_trait]
impl WebhookTransport for RecordingTransport {
    async fn post_json(&self, _url: &Url, payload: &Value) -> Result<WebhookReply, TransportError> {
        self.payloads
            .lock()
            .expect("payload mutex poisoned")
            .push(payload.clone());
        self.outcome.clone()
    }
}

#[derive(Default)]
pub(super) struct MemoryStore {
    created: Mutex<Vec<(String, Value)>>,
    reject_writes: bool,
}

impl MemoryStore {
    pub(super) fn rejecting() -> Self {
        Self {
            reject_writes: true,
            ..Self::default()
        }
    }

    pub(super) fn created(&self) -> Vec<(String, Value)> {
        self.created.lock().expect("store mutex poisoned").clone()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn query_items(
        &self,
        _collection: &str,
        _query: &ItemQuery,
    ) -> Result<Vec<Value>, ContentStoreError> {
        Ok(Vec::new())
    }

    async fn create_item(&self, collection: &str, item: &Value) -> Result<Value, ContentStoreError> {
        if self.reject_writes {
            return Err(ContentStoreError::Status {
                status: 403,
                body: "forbidden".to_string(),
            });
        }
        self.created
            .lock()
            .expect("store mutex poisoned")
            .push((collection.to_string(), item.clone()));
        Ok(item.clone())
    }
}

pub(super) fn build_service(
    transport: Arc<RecordingTransport>,
    store: Arc<MemoryStore>,
) -> Arc<InquiryService<RecordingTransport, MemoryStore>> {
    let url = Url::parse(WEBHOOK_URL).expect("valid webhook url");
    let gateway = SubmissionGateway::new(transport, url);
    let content = Arc::new(ContentClient::new(store));
    Arc::new(InquiryService::new(gateway, content))
}

pub(super) fn router_with(
    transport: Arc<RecordingTransport>,
    store: Arc<MemoryStore>,
) -> axum::Router {
    inquiry_router(build_service(transport, store))
}

pub(super) fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected JSON object, got {other}"),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
