use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::ContentError;
use crate::webhook::UpstreamError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Details {
    Text(String),
    List(Vec<String>),
}

/// Response body shared by every form endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Details>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ApiEnvelope {
    pub fn success(message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
            details: None,
            data,
        }
    }

    pub fn failure(error: impl Into<String>, details: Option<Details>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
            details,
            data: None,
        }
    }
}

/// Failure raised while handling an inquiry.
#[derive(Debug, thiserror::Error)]
pub enum InquiryError {
    #[error("Validation failed")]
    Validation(Vec<String>),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error("Failed to store form submission")]
    Content(#[from] ContentError),
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

impl InquiryError {
    pub fn status(&self) -> StatusCode {
        match self {
            InquiryError::Validation(_) => StatusCode::BAD_REQUEST,
            InquiryError::Upstream(_) | InquiryError::Content(_) | InquiryError::InvalidBody(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn envelope(&self) -> ApiEnvelope {
        let details = match self {
            InquiryError::Validation(errors) => Some(Details::List(errors.clone())),
            InquiryError::Upstream(err) => err.details().map(|body| Details::Text(body.to_string())),
            InquiryError::Content(_) | InquiryError::InvalidBody(_) => None,
        };
        ApiEnvelope::failure(self.to_string(), details)
    }
}

impl IntoResponse for InquiryError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.envelope())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validation_failure_lists_details() {
        let err = InquiryError::Validation(vec!["Name is required".to_string()]);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::to_value(err.envelope()).expect("serializes"),
            json!({
                "success": false,
                "error": "Validation failed",
                "details": ["Name is required"]
            })
        );
    }

    #[test]
    fn upstream_failure_carries_receiver_body() {
        let err = InquiryError::from(UpstreamError::Status {
            status: 502,
            status_text: "Bad Gateway".to_string(),
            body: "<html>oops</html>".to_string(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            serde_json::to_value(err.envelope()).expect("serializes"),
            json!({
                "success": false,
                "error": "Webhook error: 502 - Bad Gateway",
                "details": "<html>oops</html>"
            })
        );
    }

    #[test]
    fn success_omits_error_fields() {
        let envelope = ApiEnvelope::success("Form submitted successfully", None);
        assert_eq!(
            serde_json::to_value(envelope).expect("serializes"),
            json!({ "success": true, "message": "Form submitted successfully" })
        );
    }
}
