use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{error, info};

use super::query::{
    navigation_query, PageQuery, FORM_SUBMISSIONS_COLLECTION, NAVIGATION_COLLECTION,
    PAGES_COLLECTION,
};
use super::store::{ContentStore, ContentStoreError};
use crate::inquiries::field_text;

/// A published CMS page. Block contents stay as JSON for the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub title: Option<String>,
    pub permalink: String,
    pub status: String,
    #[serde(default)]
    pub seo: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub blocks: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Navigation {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The store sends `null` for empty relations; treat it like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Form field declaration as published by the store alongside a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormFieldRef {
    pub id: Value,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] ContentStoreError),
    #[error("unexpected content shape: {0}")]
    Shape(String),
}

impl ContentError {
    /// Message safe to hand to the browser.
    pub fn public_message(&self) -> &'static str {
        match self {
            ContentError::NotFound => "not found",
            ContentError::Store(_) | ContentError::Shape(_) => "failed to fetch content",
        }
    }
}

/// `{data, error}` envelope returned to page renderers; exactly one side is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentResult<T> {
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> From<Result<T, ContentError>> for ContentResult<T> {
    fn from(result: Result<T, ContentError>) -> Self {
        match result {
            Ok(data) => Self {
                data: Some(data),
                error: None,
            },
            Err(err) => Self {
                data: None,
                error: Some(err.public_message().to_string()),
            },
        }
    }
}

pub struct ContentClient<S> {
    store: Arc<S>,
}

impl<S> ContentClient<S>
where
    S: ContentStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Fetch a published page; failures are folded into the envelope.
    pub async fn page_data(&self, slug: &str) -> ContentResult<Page> {
        self.fetch_page(slug).await.into()
    }

    pub async fn fetch_page(&self, slug: &str) -> Result<Page, ContentError> {
        let query = PageQuery::new(slug);
        let items = self
            .store
            .query_items(PAGES_COLLECTION, &query.item_query())
            .await
            .map_err(|err| {
                error!(slug = %query.slug, error = %err, "page query failed");
                ContentError::from(err)
            })?;

        let Some(item) = items.into_iter().next() else {
            info!(slug = %query.slug, "no published page for permalink");
            return Err(ContentError::NotFound);
        };

        serde_json::from_value(item).map_err(|err| {
            error!(slug = %query.slug, error = %err, "page item has unexpected shape");
            ContentError::Shape(err.to_string())
        })
    }

    pub async fn navigation_data(&self) -> ContentResult<Vec<Navigation>> {
        self.fetch_navigation().await.into()
    }

    pub async fn fetch_navigation(&self) -> Result<Vec<Navigation>, ContentError> {
        let items = self
            .store
            .query_items(NAVIGATION_COLLECTION, &navigation_query())
            .await
            .map_err(|err| {
                error!(error = %err, "navigation query failed");
                ContentError::from(err)
            })?;

        items
            .into_iter()
            .map(|item| {
                serde_json::from_value(item).map_err(|err| {
                    error!(error = %err, "navigation item has unexpected shape");
                    ContentError::Shape(err.to_string())
                })
            })
            .collect()
    }

    /// Record a submission against a store-managed form.
    pub async fn submit_form(
        &self,
        form_id: &str,
        form_data: &Map<String, Value>,
        fields: &[FormFieldRef],
    ) -> Result<Value, ContentError> {
        let submission = submission_item(form_id, form_data, fields);
        let created = self
            .store
            .create_item(FORM_SUBMISSIONS_COLLECTION, &submission)
            .await?;

        info!(form_id, "form submission stored");
        Ok(created)
    }
}

fn submission_item(
    form_id: &str,
    form_data: &Map<String, Value>,
    fields: &[FormFieldRef],
) -> Value {
    let values: Vec<Value> = fields
        .iter()
        .filter(|field| field.kind.as_deref() != Some("file"))
        .filter_map(|field| {
            let value = form_data.get(&field.name).and_then(field_text)?;
            Some(json!({ "field": field.id, "value": value }))
        })
        .collect();

    json!({ "form": form_id, "values": values })
}
