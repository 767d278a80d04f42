use crate::cli::ServeArgs;
use crate::infra::{content_client, http_client, inquiry_service, AppState};
use crate::routes::with_site_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use concierge::config::AppConfig;
use concierge::error::AppError;
use concierge::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        public_dir: Arc::new(config.site.public_dir.clone()),
    };

    let http = http_client()?;
    let content = content_client(&config, http.clone());
    let inquiries = inquiry_service(&config, http, content.clone());

    let app = with_site_routes(inquiries, content)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        public_api_url = %config.site.public_api_url,
        content_api = %config.content.base_url,
        "concierge api ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
