use serde_json::Value;

use super::catalog::{questions_for, AnswerKind};
use super::domain::{
    field_text, is_checked, yes_no, FormKind, FormStyle, FormSubmission, NormalizedPayload,
    QuestionAnswer,
};

/// Reshape a submission for relay.
///
/// Structured forms become ordered question/answer pairs following their catalog table
/// and carry the canonical lowercase id; fields missing from the table are dropped. Every other form id, known or not, is relayed
/// as submitted with `form_id` guaranteed present.
pub fn normalize(submission: FormSubmission) -> NormalizedPayload {
    let FormSubmission {
        form_id,
        mut fields,
    } = submission;

    let structured = FormKind::from_id(&form_id)
        .filter(|kind| kind.style() == FormStyle::Structured)
        .and_then(|kind| Some((kind, questions_for(kind)?)));

    let Some((kind, table)) = structured else {
        if !form_id.is_empty() && !fields.contains_key("form_id") {
            fields.insert("form_id".to_string(), Value::String(form_id));
        }
        return NormalizedPayload::Raw(fields);
    };

    let questions = table
        .iter()
        .filter_map(|mapping| {
            let raw = fields.get(mapping.field);
            let answer = match mapping.kind {
                AnswerKind::Consent => yes_no(is_checked(raw)).to_string(),
                AnswerKind::Text => raw.and_then(field_text)?,
            };
            Some(QuestionAnswer {
                question: mapping.label.to_string(),
                answer,
            })
        })
        .collect();

    NormalizedPayload::Structured {
        form_id: kind.id().to_string(),
        questions,
    }
}
