use serde_json::{json, Map, Value};

pub const PAGES_COLLECTION: &str = "pages";
pub const NAVIGATION_COLLECTION: &str = "navigation";
pub const FORM_SUBMISSIONS_COLLECTION: &str = "form_submissions";

/// Scalars plus three levels of block expansion. `blocks.pages_id` points back at the
/// page itself and is left out, otherwise the store expands the page recursively.
pub const PAGE_FIELDS: &[&str] = &[
    "*",
    "seo.*",
    "blocks.id",
    "blocks.sort",
    "blocks.collection",
    "blocks.hide_block",
    "blocks.background",
    "blocks.item.*",
    "blocks.item.*.*",
];

pub const NAVIGATION_FIELDS: &[&str] = &["*", "items.*"];

/// Filter expression in the store's JSON filter syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq { field: String, value: Value },
    And(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn and(filters: Vec<Filter>) -> Self {
        Filter::And(filters)
    }

    pub fn to_json(&self) -> Value {
        match self {
            Filter::Eq { field, value } => {
                let mut clause = Map::new();
                clause.insert(field.clone(), json!({ "_eq": value }));
                Value::Object(clause)
            }
            Filter::And(filters) => {
                json!({ "_and": filters.iter().map(Filter::to_json).collect::<Vec<_>>() })
            }
        }
    }
}

/// Collection query handed to a [`crate::content::ContentStore`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemQuery {
    pub fields: Vec<String>,
    pub filter: Option<Filter>,
    pub limit: Option<u32>,
}

impl ItemQuery {
    pub fn new(fields: &[&str]) -> Self {
        Self {
            fields: fields.iter().map(|field| field.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query-string pairs in the order the store documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.fields.is_empty() {
            pairs.push(("fields", self.fields.join(",")));
        }
        if let Some(filter) = &self.filter {
            pairs.push(("filter", filter.to_json().to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// Lookup of one published page by exact permalink.
#[derive(Debug, Clone, PartialEq)]
pub struct PageQuery {
    pub slug: String,
}

impl PageQuery {
    pub fn new(slug: &str) -> Self {
        Self {
            slug: normalize_slug(slug),
        }
    }

    pub fn item_query(&self) -> ItemQuery {
        ItemQuery::new(PAGE_FIELDS)
            .filter(Filter::and(vec![
                Filter::eq("permalink", self.slug.as_str()),
                Filter::eq("status", "published"),
            ]))
            .limit(1)
    }
}

/// Permalinks always start with `/`; casing is preserved.
pub fn normalize_slug(slug: &str) -> String {
    let trimmed = slug.trim();
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

pub fn navigation_query() -> ItemQuery {
    ItemQuery::new(NAVIGATION_FIELDS).filter(Filter::eq("is_active", true))
}
