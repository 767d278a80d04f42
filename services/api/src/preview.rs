use crate::infra::{content_client, http_client};
use clap::Args;
use concierge::config::AppConfig;
use concierge::error::AppError;
use concierge::inquiries::{normalize, validate, FormKind, FormSubmission, InquiryRoute};
use serde_json::{json, Map, Value};

#[derive(Args, Debug)]
pub(crate) struct PageArgs {
    /// Page permalink; a missing leading slash is added
    #[arg(long, default_value = "/")]
    pub(crate) slug: String,
}

#[derive(Args, Debug)]
pub(crate) struct FormPreviewArgs {
    /// Form id, e.g. `assistant`, `custom-journeys` or `villa`
    #[arg(long)]
    pub(crate) form: String,
    /// Submitted field as key=value; repeat a key for multi-select answers
    #[arg(long = "field", value_parser = parse_field)]
    pub(crate) fields: Vec<(String, String)>,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

pub(crate) async fn run_page(args: PageArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let client = content_client(&config, http_client()?);
    let envelope = client.page_data(&args.slug).await;
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

pub(crate) async fn run_navigation() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let client = content_client(&config, http_client()?);
    let menus = client.fetch_navigation().await?;
    println!("{}", serde_json::to_string_pretty(&menus)?);
    Ok(())
}

pub(crate) fn run_form_preview(args: FormPreviewArgs) -> Result<(), AppError> {
    let preview = preview_form(&args.form, args.fields);
    println!("{}", serde_json::to_string_pretty(&preview)?);
    Ok(())
}

/// What the matching endpoint would accept and relay, minus the timestamp.
fn preview_form(form: &str, entries: Vec<(String, String)>) -> Value {
    let kind = FormKind::from_id(form);
    let route = kind
        .and_then(|kind| {
            InquiryRoute::ALL
                .into_iter()
                .find(|route| route.form() == Some(kind))
        })
        .unwrap_or(InquiryRoute::SendForm);

    let fields = collect_fields(entries);
    let errors = match route.rules().map(|rules| validate(rules, &fields)) {
        Some(Err(errors)) => errors,
        Some(Ok(())) | None => Vec::new(),
    };

    let form_id = kind.map_or_else(|| form.trim().to_string(), |kind| kind.id().to_string());
    let payload = normalize(FormSubmission::new(form_id, fields)).into_json();

    json!({
        "route": route.path(),
        "valid": errors.is_empty(),
        "errors": errors,
        "payload": payload,
    })
}

fn collect_fields(entries: Vec<(String, String)>) -> Map<String, Value> {
    let mut fields = Map::new();
    for (key, value) in entries {
        match fields.get_mut(&key) {
            Some(Value::Array(values)) => values.push(Value::String(value)),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, Value::String(value)]);
            }
            None => {
                fields.insert(key, Value::String(value));
            }
        }
    }
    fields
}
