use super::domain::FormKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKind {
    Text,
    /// Checkbox rendered as Yes/No; emitted even when the box was left unticked.
    Consent,
}

/// Submitted field name and the label the concierge team reads it under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionMapping {
    pub field: &'static str,
    pub label: &'static str,
    pub kind: AnswerKind,
}

const fn text(field: &'static str, label: &'static str) -> QuestionMapping {
    QuestionMapping {
        field,
        label,
        kind: AnswerKind::Text,
    }
}

const fn consent(field: &'static str, label: &'static str) -> QuestionMapping {
    QuestionMapping {
        field,
        label,
        kind: AnswerKind::Consent,
    }
}

const NEWSLETTER: QuestionMapping = consent("newsletter", "Subscribe to newsletter");
const PRIVACY: QuestionMapping = consent("privacy", "Privacy Policy acceptance");

const ASSISTANT: &[QuestionMapping] = &[
    text("name", "Name & Surname"),
    text("email", "Email"),
    text("phone", "Phone number"),
    text("city", "City of residence"),
    text("services", "Services required"),
    text("startDate", "Start date"),
    text("endDate", "End date"),
    text("languages", "Preferred languages"),
    text("message", "Additional requests"),
    NEWSLETTER,
    PRIVACY,
];

const EVENTS_V2: &[QuestionMapping] = &[
    text("name", "Name & Surname"),
    text("email", "Email"),
    text("phone", "Phone number"),
    text("eventType", "Type of event"),
    text("eventDate", "Event date"),
    text("location", "Preferred location"),
    text("guests", "Number of guests"),
    text("budget", "Estimated budget"),
    text("services", "Services of interest"),
    text("message", "Tell us about your event"),
    NEWSLETTER,
    PRIVACY,
];

const CORPORATE: &[QuestionMapping] = &[
    text("companyName", "Company name"),
    text("contactPerson", "Contact person"),
    text("email", "Business email"),
    text("phone", "Phone number"),
    text("industry", "Industry"),
    text("employees", "Company size"),
    text("services", "Services of interest"),
    text("startDate", "Start date"),
    text("endDate", "End date"),
    text("message", "Project details"),
    NEWSLETTER,
    PRIVACY,
];

const CUSTOM_JOURNEYS: &[QuestionMapping] = &[
    text("name", "Name & Surname"),
    text("email", "Email"),
    text("phone", "Phone number"),
    text("destination", "Dream destination"),
    text("departureDate", "Departure date"),
    text("returnDate", "Return date"),
    text("travelers", "Number of travellers"),
    text("budget", "Budget per person"),
    text("interests", "Travel interests"),
    text("accommodation", "Preferred accommodation"),
    text("message", "Anything else we should know"),
    NEWSLETTER,
    PRIVACY,
];

/// Ordered question table for structured forms; legacy forms have none.
pub fn questions_for(kind: FormKind) -> Option<&'static [QuestionMapping]> {
    match kind {
        FormKind::Assistant => Some(ASSISTANT),
        FormKind::EventsV2 => Some(EVENTS_V2),
        FormKind::Corporate => Some(CORPORATE),
        FormKind::CustomJourneys => Some(CUSTOM_JOURNEYS),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inquiries::domain::FormStyle;
    use std::collections::HashSet;

    #[test]
    fn only_structured_forms_have_tables() {
        for kind in FormKind::ALL {
            assert_eq!(
                questions_for(kind).is_some(),
                kind.style() == FormStyle::Structured,
                "{kind:?}"
            );
        }
    }

    #[test]
    fn tables_have_unique_fields_and_labels() {
        for kind in FormKind::ALL {
            let Some(table) = questions_for(kind) else {
                continue;
            };
            let fields: HashSet<_> = table.iter().map(|entry| entry.field).collect();
            assert_eq!(fields.len(), table.len(), "{kind:?} repeats a field");
            assert!(table.iter().all(|entry| !entry.label.trim().is_empty()));
            assert!(table.contains(&PRIVACY), "{kind:?} lacks privacy consent");
        }
    }
}
