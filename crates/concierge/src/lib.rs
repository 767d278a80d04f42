//! Content and inquiry pipeline behind the concierge marketing site.

pub mod config;
pub mod content;
pub mod error;
pub mod inquiries;
pub mod telemetry;
pub mod webhook;
