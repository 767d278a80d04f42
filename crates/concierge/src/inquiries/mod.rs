//! Lead-generation inquiry forms: validation, normalization, and relay to the webhook.

pub mod catalog;
pub mod domain;
pub mod envelope;
pub mod normalizer;
pub mod router;
pub mod routes;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use catalog::{questions_for, AnswerKind, QuestionMapping};
pub use domain::{
    field_text, FormKind, FormStyle, FormSubmission, NormalizedPayload, QuestionAnswer,
};
pub use envelope::{ApiEnvelope, Details, InquiryError};
pub use normalizer::normalize;
pub use router::inquiry_router;
pub use routes::InquiryRoute;
pub use service::{InquiryReceipt, InquiryService, StoredFormRequest};
pub use validation::{validate, RuleSet};
