//! Validated input types.
//!
//! These types check their invariants at construction time so that the
//! client never builds a request from a malformed base URL or a blank query.

mod api_url;
mod environment;
mod query;

pub use api_url::ApiUrl;
pub use environment::Environment;
pub use query::SearchQuery;
