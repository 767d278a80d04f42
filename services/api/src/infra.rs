use concierge::config::AppConfig;
use concierge::content::{ContentClient, HttpContentStore};
use concierge::inquiries::InquiryService;
use concierge::webhook::{HttpWebhookTransport, SubmissionGateway};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(crate) type SiteContent = ContentClient<HttpContentStore>;
pub(crate) type SiteInquiries = InquiryService<HttpWebhookTransport, HttpContentStore>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) public_dir: Arc<PathBuf>,
}

/// Shared outbound client; no timeout is configured.
pub(crate) fn http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().build()
}

/// Content client over the configured store. The `reqwest` client is shared so
/// the store and the webhook relay draw from one connection pool.
pub(crate) fn content_client(config: &AppConfig, http: reqwest::Client) -> Arc<SiteContent> {
    let store = HttpContentStore::new(
        http,
        config.content.base_url.clone(),
        config.content.access_token.clone(),
    );
    Arc::new(ContentClient::new(Arc::new(store)))
}

pub(crate) fn inquiry_service(
    config: &AppConfig,
    http: reqwest::Client,
    content: Arc<SiteContent>,
) -> Arc<SiteInquiries> {
    let gateway = SubmissionGateway::new(
        Arc::new(HttpWebhookTransport::new(http)),
        config.webhook.url.clone(),
    );
    Arc::new(InquiryService::new(gateway, content))
}
