use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Whether a form is relayed verbatim or reshaped into question/answer pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStyle {
    Legacy,
    Structured,
}

/// Inquiry forms published on the site, keyed by the `form_id` they submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Villa,
    Yacht,
    Events,
    Exclusive,
    Shopping,
    Airport,
    Contact,
    TripInquiry,
    Assistant,
    EventsV2,
    Corporate,
    CustomJourneys,
}

impl FormKind {
    pub const ALL: [FormKind; 12] = [
        FormKind::Villa,
        FormKind::Yacht,
        FormKind::Events,
        FormKind::Exclusive,
        FormKind::Shopping,
        FormKind::Airport,
        FormKind::Contact,
        FormKind::TripInquiry,
        FormKind::Assistant,
        FormKind::EventsV2,
        FormKind::Corporate,
        FormKind::CustomJourneys,
    ];

    pub fn id(self) -> &'static str {
        match self {
            FormKind::Villa => "villa",
            FormKind::Yacht => "yacht",
            FormKind::Events => "events",
            FormKind::Exclusive => "exclusive",
            FormKind::Shopping => "shopping",
            FormKind::Airport => "airport",
            FormKind::Contact => "contact",
            FormKind::TripInquiry => "trip-inquiry",
            FormKind::Assistant => "assistant",
            FormKind::EventsV2 => "events-v2",
            FormKind::Corporate => "corporate",
            FormKind::CustomJourneys => "custom-journeys",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.id().eq_ignore_ascii_case(id))
    }

    pub fn style(self) -> FormStyle {
        match self {
            FormKind::Assistant
            | FormKind::EventsV2
            | FormKind::Corporate
            | FormKind::CustomJourneys => FormStyle::Structured,
            _ => FormStyle::Legacy,
        }
    }
}

/// One browser submission. Lives for a single request.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSubmission {
    pub form_id: String,
    pub fields: Map<String, Value>,
}

impl FormSubmission {
    pub fn new(form_id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            form_id: form_id.into(),
            fields,
        }
    }

    /// Take the form id from the `form_id` hidden field the browser posts.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        let form_id = fields
            .get("form_id")
            .and_then(Value::as_str)
            .map(|id| id.trim().to_string())
            .unwrap_or_default();
        Self { form_id, fields }
    }

    pub fn kind(&self) -> Option<FormKind> {
        FormKind::from_id(&self.form_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedPayload {
    Raw(Map<String, Value>),
    Structured {
        form_id: String,
        questions: Vec<QuestionAnswer>,
    },
}

impl NormalizedPayload {
    /// JSON object relayed to the webhook (before the timestamp is added).
    pub fn into_json(self) -> Map<String, Value> {
        match self {
            NormalizedPayload::Raw(fields) => fields,
            NormalizedPayload::Structured { form_id, questions } => {
                let mut payload = Map::new();
                payload.insert("form_id".to_string(), Value::String(form_id));
                let questions = questions
                    .into_iter()
                    .map(|entry| json!({ "question": entry.question, "answer": entry.answer }))
                    .collect();
                payload.insert("questions".to_string(), Value::Array(questions));
                payload
            }
        }
    }
}

/// Render a submitted value as answer text; `None` means "not answered".
pub fn field_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => yes_no(*flag).to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(field_text)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null | Value::Object(_) => return None,
    };

    (!text.is_empty()).then_some(text)
}

/// Checkbox semantics: browsers post `"on"` when ticked and omit the field otherwise.
pub fn is_checked(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "on" | "true" | "yes" | "1"
        ),
        Some(Value::Number(number)) => number.as_i64() == Some(1),
        _ => false,
    }
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_ids_round_trip_through_kind() {
        for kind in FormKind::ALL {
            assert_eq!(FormKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(FormKind::from_id(" Events-V2 "), Some(FormKind::EventsV2));
        assert_eq!(FormKind::from_id("newsletter"), None);
    }

    #[test]
    fn field_text_renders_each_json_shape() {
        assert_eq!(field_text(&json!("  Capri ")), Some("Capri".to_string()));
        assert_eq!(field_text(&json!(12)), Some("12".to_string()));
        assert_eq!(field_text(&json!(true)), Some("Yes".to_string()));
        assert_eq!(
            field_text(&json!(["Chef", "", "Chauffeur"])),
            Some("Chef, Chauffeur".to_string())
        );
        assert_eq!(field_text(&json!("   ")), None);
        assert_eq!(field_text(&json!([])), None);
        assert_eq!(field_text(&Value::Null), None);
        assert_eq!(field_text(&json!({ "nested": 1 })), None);
    }

    #[test]
    fn checkbox_values_follow_browser_conventions() {
        assert!(is_checked(Some(&json!("on"))));
        assert!(is_checked(Some(&json!(true))));
        assert!(is_checked(Some(&json!("Yes"))));
        assert!(!is_checked(Some(&json!("off"))));
        assert!(!is_checked(Some(&json!(false))));
        assert!(!is_checked(None));
    }

    #[test]
    fn submission_reads_hidden_form_id() {
        let Value::Object(fields) = json!({ "form_id": " yacht ", "guests": "8" }) else {
            unreachable!()
        };
        let submission = FormSubmission::from_fields(fields);
        assert_eq!(submission.form_id, "yacht");
        assert_eq!(submission.kind(), Some(FormKind::Yacht));
    }
}
