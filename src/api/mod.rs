//! Typed API surface
//!
//! One module per backend area, each extending [`crate::client::Client`]
//! with endpoint wrappers that funnel through the authenticated request
//! pipeline. DTOs mirror the backend wire contract (camelCase JSON with
//! nullable fields).

pub mod auth;
pub mod chat;
pub mod club;
pub mod post;
pub mod user;

use serde::Deserialize;

/// A page of results as the backend serializes them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Page<T> {
    /// The records on this page
    pub records: Vec<T>,
    /// Total number of records across all pages
    pub total: i64,
    /// Page size
    pub size: i64,
    /// Current page number (1-based)
    pub current: i64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            total: 0,
            size: 0,
            current: 0,
        }
    }
}
