use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Map, Value};
use tracing::error;

use super::envelope::{ApiEnvelope, InquiryError};
use super::routes::InquiryRoute;
use super::service::{InquiryService, StoredFormRequest};
use crate::content::ContentStore;
use crate::webhook::WebhookTransport;

pub const SUBMIT_FORM_PATH: &str = "/api/submit-form";

/// Router builder exposing every form endpoint with permissive CORS.
pub fn inquiry_router<T, S>(service: Arc<InquiryService<T, S>>) -> Router
where
    T: WebhookTransport + 'static,
    S: ContentStore + 'static,
{
    Router::new()
        .route(
            InquiryRoute::Contact.path(),
            post(contact_handler::<T, S>).options(preflight_handler),
        )
        .route(
            InquiryRoute::CorporateServices.path(),
            post(corporate_services_handler::<T, S>).options(preflight_handler),
        )
        .route(
            InquiryRoute::CustomJourneys.path(),
            post(custom_journeys_handler::<T, S>).options(preflight_handler),
        )
        .route(
            InquiryRoute::TripInquiry.path(),
            post(trip_inquiry_handler::<T, S>).options(preflight_handler),
        )
        .route(
            InquiryRoute::SendForm.path(),
            post(send_form_handler::<T, S>).options(preflight_handler),
        )
        .route(
            SUBMIT_FORM_PATH,
            post(submit_form_handler::<T, S>).options(preflight_handler),
        )
        .layer(middleware::map_response(with_cors_headers))
        .with_state(service)
}

pub(crate) async fn contact_handler<T, S>(
    State(service): State<Arc<InquiryService<T, S>>>,
    body: Bytes,
) -> Response
where
    T: WebhookTransport + 'static,
    S: ContentStore + 'static,
{
    relay(&service, InquiryRoute::Contact, body).await
}

pub(crate) async fn corporate_services_handler<T, S>(
    State(service): State<Arc<InquiryService<T, S>>>,
    body: Bytes,
) -> Response
where
    T: WebhookTransport + 'static,
    S: ContentStore + 'static,
{
    relay(&service, InquiryRoute::CorporateServices, body).await
}

pub(crate) async fn custom_journeys_handler<T, S>(
    State(service): State<Arc<InquiryService<T, S>>>,
    body: Bytes,
) -> Response
where
    T: WebhookTransport + 'static,
    S: ContentStore + 'static,
{
    relay(&service, InquiryRoute::CustomJourneys, body).await
}

pub(crate) async fn trip_inquiry_handler<T, S>(
    State(service): State<Arc<InquiryService<T, S>>>,
    body: Bytes,
) -> Response
where
    T: WebhookTransport + 'static,
    S: ContentStore + 'static,
{
    relay(&service, InquiryRoute::TripInquiry, body).await
}

pub(crate) async fn send_form_handler<T, S>(
    State(service): State<Arc<InquiryService<T, S>>>,
    body: Bytes,
) -> Response
where
    T: WebhookTransport + 'static,
    S: ContentStore + 'static,
{
    relay(&service, InquiryRoute::SendForm, body).await
}

pub(crate) async fn submit_form_handler<T, S>(
    State(service): State<Arc<InquiryService<T, S>>>,
    body: Bytes,
) -> Response
where
    T: WebhookTransport + 'static,
    S: ContentStore + 'static,
{
    let result = match parse_object(&body) {
        Ok(body) => match StoredFormRequest::from_body(&body) {
            Ok(request) => service.submit_stored_form(request).await,
            Err(err) => Err(err),
        },
        Err(err) => Err(err),
    };

    match result {
        Ok(_) => {
            let envelope = ApiEnvelope::success("Form submitted successfully", None);
            (StatusCode::OK, Json(envelope)).into_response()
        }
        Err(err) => failure_response(SUBMIT_FORM_PATH, err),
    }
}

pub(crate) async fn preflight_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({})))
}

async fn relay<T, S>(service: &InquiryService<T, S>, route: InquiryRoute, body: Bytes) -> Response
where
    T: WebhookTransport + 'static,
    S: ContentStore + 'static,
{
    let fields = match parse_object(&body) {
        Ok(fields) => fields,
        Err(err) => return failure_response(route.path(), err),
    };

    match service.submit(route, fields).await {
        Ok(receipt) => {
            let envelope = ApiEnvelope::success(receipt.message, Some(receipt.data));
            (StatusCode::OK, Json(envelope)).into_response()
        }
        Err(err) => failure_response(route.path(), err),
    }
}

fn parse_object(body: &[u8]) -> Result<Map<String, Value>, InquiryError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(InquiryError::InvalidBody(
            "expected a JSON object".to_string(),
        )),
        Err(err) => Err(InquiryError::InvalidBody(err.to_string())),
    }
}

fn failure_response(path: &'static str, err: InquiryError) -> Response {
    if let InquiryError::InvalidBody(reason) = &err {
        error!(route = path, %reason, "unreadable request body");
    }
    err.into_response()
}

async fn with_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}
