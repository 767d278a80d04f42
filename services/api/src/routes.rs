use crate::infra::AppState;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use concierge::content::{content_router, ContentClient, ContentStore};
use concierge::inquiries::{inquiry_router, InquiryService};
use concierge::webhook::WebhookTransport;
use serde_json::json;
use std::path::{Component, PathBuf};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::debug;

pub(crate) const ASSET_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

pub(crate) fn with_site_routes<T, S>(
    inquiries: Arc<InquiryService<T, S>>,
    content: Arc<ContentClient<S>>,
) -> Router
where
    T: WebhookTransport + 'static,
    S: ContentStore + 'static,
{
    inquiry_router(inquiries)
        .merge(content_router(content))
        .route("/api/assets/*path", get(asset_endpoint))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Serve a file from the public directory with long-lived caching.
pub(crate) async fn asset_endpoint(
    Extension(state): Extension<AppState>,
    Path(requested): Path<String>,
) -> Response {
    let Some(relative) = asset_path(&requested) else {
        debug!(path = %requested, "rejected asset path");
        return file_not_found();
    };

    let file = state.public_dir.join(relative);
    match tokio::fs::read(&file).await {
        Ok(bytes) => {
            let mime = mime_guess::from_path(&file).first_or_octet_stream();
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, mime.to_string()),
                    (header::CACHE_CONTROL, ASSET_CACHE_CONTROL.to_string()),
                ],
                bytes,
            )
                .into_response()
        }
        Err(err) => {
            debug!(path = %file.display(), error = %err, "asset unavailable");
            file_not_found()
        }
    }
}

/// Only plain relative segments; anything that could leave the public directory is refused.
fn asset_path(requested: &str) -> Option<PathBuf> {
    let mut clean = PathBuf::new();
    for component in std::path::Path::new(requested).components() {
        match component {
            Component::Normal(segment) => clean.push(segment),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    (!clean.as_os_str().is_empty()).then_some(clean)
}

fn file_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "File not found",
    )
        .into_response()
}
