use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde_json::{Map, Value};

use super::domain::field_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCheck {
    Any,
    Email,
    MinChars(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub check: FieldCheck,
}

/// Both dates optional; when both are given the end must fall strictly after the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateOrder {
    pub start: &'static str,
    pub start_label: &'static str,
    pub end: &'static str,
    pub end_label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    pub fields: &'static [FieldRule],
    pub date_order: Option<DateOrder>,
}

const fn required(field: &'static str, label: &'static str) -> FieldRule {
    FieldRule {
        field,
        label,
        required: true,
        check: FieldCheck::Any,
    }
}

const REQUIRED_EMAIL: FieldRule = FieldRule {
    field: "email",
    label: "Email",
    required: true,
    check: FieldCheck::Email,
};

const TRAVEL_DATES: DateOrder = DateOrder {
    start: "departureDate",
    start_label: "departure date",
    end: "returnDate",
    end_label: "Return date",
};

pub const CONTACT_RULES: RuleSet = RuleSet {
    fields: &[
        required("name", "Name"),
        REQUIRED_EMAIL,
        FieldRule {
            field: "message",
            label: "Message",
            required: true,
            check: FieldCheck::MinChars(10),
        },
    ],
    date_order: None,
};

pub const CORPORATE_SERVICES_RULES: RuleSet = RuleSet {
    fields: &[
        required("companyName", "Company name"),
        required("contactPerson", "Contact person"),
        REQUIRED_EMAIL,
        required("phone", "Phone"),
    ],
    date_order: Some(DateOrder {
        start: "startDate",
        start_label: "start date",
        end: "endDate",
        end_label: "End date",
    }),
};

pub const CUSTOM_JOURNEYS_RULES: RuleSet = RuleSet {
    fields: &[
        required("name", "Name"),
        REQUIRED_EMAIL,
        required("destination", "Destination"),
    ],
    date_order: Some(TRAVEL_DATES),
};

pub const TRIP_INQUIRY_RULES: RuleSet = RuleSet {
    fields: &[
        required("name", "Name"),
        required("surname", "Surname"),
        REQUIRED_EMAIL,
        required("city", "City"),
        required("country", "Country"),
        required("destination", "Destination"),
    ],
    date_order: Some(TRAVEL_DATES),
};

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
    })
}

pub fn is_valid_email(value: &str) -> bool {
    email_pattern().is_match(value)
}

/// Apply a rule table, collecting one message per failed rule.
pub fn validate(rules: &RuleSet, fields: &Map<String, Value>) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for rule in rules.fields {
        let Some(value) = fields.get(rule.field).and_then(field_text) else {
            if rule.required {
                errors.push(format!("{} is required", rule.label));
            }
            continue;
        };

        match rule.check {
            FieldCheck::Any => {}
            FieldCheck::Email => {
                // Untrimmed: this string is relayed as-is.
                let submitted = fields
                    .get(rule.field)
                    .and_then(Value::as_str)
                    .unwrap_or(&value);
                if !is_valid_email(submitted) {
                    errors.push("Please provide a valid email address".to_string());
                }
            }
            FieldCheck::MinChars(min) => {
                if value.chars().count() < min {
                    errors.push(format!(
                        "{} must be at least {min} characters long",
                        rule.label
                    ));
                }
            }
        }
    }

    if let Some(order) = rules.date_order {
        let start = fields.get(order.start).and_then(parse_date);
        let end = fields.get(order.end).and_then(parse_date);
        if let (Some(start), Some(end)) = (start, end) {
            if end <= start {
                errors.push(format!(
                    "{} must be after {}",
                    order.end_label, order.start_label
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn parse_date(value: &Value) -> Option<NaiveDate> {
    let raw = value.as_str()?.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}
