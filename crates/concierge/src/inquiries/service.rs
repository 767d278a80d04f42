use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{error, info, warn};

use super::domain::FormSubmission;
use super::envelope::InquiryError;
use super::normalizer::normalize;
use super::routes::InquiryRoute;
use super::validation::validate;
use crate::content::{ContentClient, ContentStore, FormFieldRef};
use crate::webhook::{SubmissionGateway, WebhookTransport};

/// Outcome of a relayed inquiry, ready to be folded into the success envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct InquiryReceipt {
    pub message: &'static str,
    pub data: Value,
}

/// Payload of `/api/submit-form`, forms whose definitions live in the content store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFormRequest {
    pub form_id: String,
    pub form_data: Map<String, Value>,
    pub fields: Vec<FormFieldRef>,
}

impl StoredFormRequest {
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, InquiryError> {
        let mut errors = Vec::new();

        let form_id = body
            .get("formId")
            .and_then(|value| match value {
                Value::String(id) => Some(id.trim().to_string()),
                Value::Number(id) => Some(id.to_string()),
                _ => None,
            })
            .filter(|id| !id.is_empty());
        if form_id.is_none() {
            errors.push("formId is required".to_string());
        }

        let form_data = body.get("formData").and_then(Value::as_object).cloned();
        if form_data.is_none() {
            errors.push("formData is required".to_string());
        }

        let fields = match body.get("fields") {
            Some(Value::Array(items)) => {
                serde_json::from_value::<Vec<FormFieldRef>>(Value::Array(items.clone())).ok()
            }
            _ => None,
        };
        if fields.is_none() {
            errors.push("fields must be an array of form fields".to_string());
        }

        match (form_id, form_data, fields) {
            (Some(form_id), Some(form_data), Some(fields)) if errors.is_empty() => Ok(Self {
                form_id,
                form_data,
                fields,
            }),
            _ => Err(InquiryError::Validation(errors)),
        }
    }
}

/// Service composing validation, normalization, and the webhook gateway.
pub struct InquiryService<T, S> {
    gateway: SubmissionGateway<T>,
    content: Arc<ContentClient<S>>,
}

impl<T, S> InquiryService<T, S>
where
    T: WebhookTransport + 'static,
    S: ContentStore + 'static,
{
    pub fn new(gateway: SubmissionGateway<T>, content: Arc<ContentClient<S>>) -> Self {
        Self { gateway, content }
    }

    /// Validate, normalize, and relay one inquiry. The webhook is untouched on rejection.
    pub async fn submit(
        &self,
        route: InquiryRoute,
        fields: Map<String, Value>,
    ) -> Result<InquiryReceipt, InquiryError> {
        if let Some(rules) = route.rules() {
            if let Err(errors) = validate(rules, &fields) {
                warn!(route = route.path(), ?errors, "inquiry rejected");
                return Err(InquiryError::Validation(errors));
            }
        }

        let submission = match route.form() {
            Some(kind) => FormSubmission::new(kind.id(), fields),
            None => FormSubmission::from_fields(fields),
        };
        let form_id = submission.form_id.clone();
        let payload = normalize(submission).into_json();

        let body = self.gateway.submit(payload).await.map_err(|err| {
            error!(route = route.path(), %form_id, error = %err, "webhook relay failed");
            InquiryError::from(err)
        })?;

        info!(route = route.path(), %form_id, "inquiry relayed");
        Ok(InquiryReceipt {
            message: route.success_message(),
            data: body.into_data(),
        })
    }

    /// Hand a store-defined form over to the content store.
    pub async fn submit_stored_form(
        &self,
        request: StoredFormRequest,
    ) -> Result<Value, InquiryError> {
        let StoredFormRequest {
            form_id,
            form_data,
            fields,
        } = request;

        self.content
            .submit_form(&form_id, &form_data, &fields)
            .await
            .map_err(|err| {
                error!(%form_id, error = %err, "content store rejected submission");
                InquiryError::from(err)
            })
    }
}
