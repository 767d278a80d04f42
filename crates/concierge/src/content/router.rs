use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use super::client::{ContentClient, ContentError, ContentResult};
use super::store::ContentStore;

/// Read-only JSON endpoints over the content client.
pub fn content_router<S>(client: Arc<ContentClient<S>>) -> Router
where
    S: ContentStore + 'static,
{
    Router::new()
        .route("/api/pages", get(home_page_handler::<S>))
        .route("/api/pages/*slug", get(page_handler::<S>))
        .route("/api/navigation", get(navigation_handler::<S>))
        .with_state(client)
}

pub(crate) async fn home_page_handler<S>(State(client): State<Arc<ContentClient<S>>>) -> Response
where
    S: ContentStore + 'static,
{
    page_response(client.fetch_page("/").await)
}

pub(crate) async fn page_handler<S>(
    State(client): State<Arc<ContentClient<S>>>,
    Path(slug): Path<String>,
) -> Response
where
    S: ContentStore + 'static,
{
    page_response(client.fetch_page(&slug).await)
}

pub(crate) async fn navigation_handler<S>(
    State(client): State<Arc<ContentClient<S>>>,
) -> Response
where
    S: ContentStore + 'static,
{
    let result = client.fetch_navigation().await;
    let status = status_for(&result);
    (status, Json(ContentResult::from(result))).into_response()
}

fn page_response<T: serde::Serialize>(result: Result<T, ContentError>) -> Response {
    let status = status_for(&result);
    (status, Json(ContentResult::from(result))).into_response()
}

fn status_for<T>(result: &Result<T, ContentError>) -> StatusCode {
    match result {
        Ok(_) => StatusCode::OK,
        Err(ContentError::NotFound) => StatusCode::NOT_FOUND,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentStoreError, ItemQuery};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct FixedStore(Result<Vec<Value>, ContentStoreError>);

    #[async_trait]
    impl ContentStore for FixedStore {
        async fn query_items(
            &self,
            _collection: &str,
            _query: &ItemQuery,
        ) -> Result<Vec<Value>, ContentStoreError> {
            self.0.clone()
        }

        async fn create_item(
            &self,
            _collection: &str,
            _item: &Value,
        ) -> Result<Value, ContentStoreError> {
            Ok(Value::Null)
        }
    }

    fn router(result: Result<Vec<Value>, ContentStoreError>) -> Router {
        content_router(Arc::new(ContentClient::new(Arc::new(FixedStore(result)))))
    }

    async fn read_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn nested_slug_resolves_to_page() {
        let response = router(Ok(vec![json!({
            "permalink": "/destinations/amalfi",
            "status": "published",
            "title": "Amalfi"
        })]))
        .oneshot(
            Request::get("/api/pages/destinations/amalfi")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["data"]["title"], json!("Amalfi"));
        assert_eq!(body["error"], Value::Null);
    }

    #[tokio::test]
    async fn missing_page_is_404_with_envelope() {
        let response = router(Ok(Vec::new()))
            .oneshot(
                Request::get("/api/pages/nowhere")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = read_json(response).await;
        assert_eq!(body, json!({ "data": null, "error": "not found" }));
    }

    #[tokio::test]
    async fn store_outage_is_500() {
        let response = router(Err(ContentStoreError::Transport("refused".to_string())))
            .oneshot(
                Request::get("/api/navigation")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = read_json(response).await;
        assert_eq!(body["error"], json!("failed to fetch content"));
    }
}
