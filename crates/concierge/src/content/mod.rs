//! Read access to the headless content store: published pages, navigation, and the
//! store-side form submission helper.

mod client;
pub mod query;
pub mod router;
mod store;

pub use client::{ContentClient, ContentError, ContentResult, FormFieldRef, Navigation, Page};
pub use query::{normalize_slug, Filter, ItemQuery, PageQuery};
pub use router::content_router;
pub use store::{ContentStore, ContentStoreError, HttpContentStore};
