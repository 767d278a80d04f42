use serde_json::{json, Value};

use super::transport::{TransportError, WebhookReply};

pub const EMPTY_BODY_MESSAGE: &str = "Data processed successfully";

/// Successful webhook reply, tagged by how much of the body could be understood.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookBody {
    Json(Value),
    Raw(String),
    Empty,
}

impl WebhookBody {
    /// Shape echoed back to the browser under `data`.
    pub fn into_data(self) -> Value {
        match self {
            WebhookBody::Json(value) => value,
            WebhookBody::Raw(text) => json!({ "message": text, "raw": true }),
            WebhookBody::Empty => json!({ "message": EMPTY_BODY_MESSAGE, "empty": true }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpstreamError {
    #[error("Webhook error: {status} - {status_text}")]
    Status {
        status: u16,
        status_text: String,
        body: String,
    },
    #[error("Connection error: {0}")]
    Connection(String),
}

impl UpstreamError {
    /// Raw receiver body, surfaced to the caller as `details`.
    pub fn details(&self) -> Option<&str> {
        match self {
            UpstreamError::Status { body, .. } => Some(body.as_str()),
            UpstreamError::Connection(_) => None,
        }
    }
}

impl From<TransportError> for UpstreamError {
    fn from(err: TransportError) -> Self {
        UpstreamError::Connection(err.message)
    }
}

pub fn classify(reply: WebhookReply) -> Result<WebhookBody, UpstreamError> {
    let WebhookReply {
        status,
        status_text,
        content_type,
        body,
    } = reply;

    if !(200..300).contains(&status) {
        return Err(UpstreamError::Status {
            status,
            status_text,
            body,
        });
    }

    if body.trim().is_empty() {
        return Ok(WebhookBody::Empty);
    }

    if declares_json(content_type.as_deref()) {
        return Ok(match serde_json::from_str::<Value>(&body) {
            Ok(value) => WebhookBody::Json(value),
            Err(_) => WebhookBody::Raw(body),
        });
    }

    Ok(WebhookBody::Raw(body))
}

fn declares_json(content_type: Option<&str>) -> bool {
    let Some(raw) = content_type else {
        return false;
    };

    match raw.parse::<mime::Mime>() {
        Ok(parsed) => parsed.subtype() == mime::JSON || parsed.suffix() == Some(mime::JSON),
        Err(_) => raw.to_ascii_lowercase().contains("json"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(status: u16, content_type: Option<&str>, body: &str) -> WebhookReply {
        WebhookReply {
            status,
            status_text: match status {
                200 => "OK",
                503 => "Service Unavailable",
                _ => "",
            }
            .to_string(),
            content_type: content_type.map(str::to_owned),
            body: body.to_string(),
        }
    }

    #[test]
    fn non_success_status_carries_body_as_details() {
        let err = classify(reply(503, Some("text/plain"), "maintenance window"))
            .expect_err("503 is a failure");

        assert_eq!(err.to_string(), "Webhook error: 503 - Service Unavailable");
        assert_eq!(err.details(), Some("maintenance window"));
    }

    #[test]
    fn empty_body_is_tagged_empty() {
        let body = classify(reply(200, None, "")).expect("2xx succeeds");
        assert_eq!(body, WebhookBody::Empty);
        assert_eq!(
            body.into_data(),
            json!({ "message": EMPTY_BODY_MESSAGE, "empty": true })
        );
    }

    #[test]
    fn whitespace_body_counts_as_empty() {
        let body = classify(reply(204, Some("application/json"), "  \n")).expect("2xx");
        assert_eq!(body, WebhookBody::Empty);
    }

    #[test]
    fn json_body_is_parsed_when_declared() {
        let body = classify(reply(
            200,
            Some("application/json; charset=utf-8"),
            r#"{"accepted":true}"#,
        ))
        .expect("2xx");
        assert_eq!(body, WebhookBody::Json(json!({ "accepted": true })));
    }

    #[test]
    fn vendor_json_suffix_is_recognised() {
        let body = classify(reply(200, Some("application/problem+json"), "[1,2]")).expect("2xx");
        assert_eq!(body, WebhookBody::Json(json!([1, 2])));
    }

    #[test]
    fn malformed_json_falls_back_to_raw() {
        let body = classify(reply(200, Some("application/json"), "Accepted")).expect("2xx");
        assert_eq!(
            body.into_data(),
            json!({ "message": "Accepted", "raw": true })
        );
    }

    #[test]
    fn text_body_is_raw_even_if_it_looks_like_json() {
        let body = classify(reply(200, Some("text/plain"), r#"{"ok":1}"#)).expect("2xx");
        assert_eq!(body, WebhookBody::Raw(r#"{"ok":1}"#.to_string()));
    }

    #[test]
    fn transport_failures_become_connection_errors() {
        let err = UpstreamError::from(TransportError::new("connection refused"));
        assert_eq!(err.to_string(), "Connection error: connection refused");
        assert!(err.details().is_none());
    }
}
