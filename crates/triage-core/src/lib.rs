//! triage-core - Null-safe records and windowed search for the Triage
//! sandbox API.
//!
//! Responses are decoded with [`json::parse`] into records from [`model`]
//! whose fields are always populated. [`WindowedSearch`] drives any
//! [`SearchSource`] across a time range.
//!
//! ```
//! use triage_core::json;
//! use triage_core::model::StaticReport;
//! use triage_core::{MISSING_NUMBER, Record};
//!
//! let report: StaticReport = json::parse(Some(r#"{"version": "0.3"}"#)).unwrap();
//! assert!(!report.is_empty());
//! assert_eq!(report.version, "0.3");
//! assert_eq!(report.unpack_count, MISSING_NUMBER);
//! ```

pub mod cache;
pub mod error;
pub mod json;
pub mod model;
pub mod search;
pub mod time;
pub mod traits;
pub mod types;

pub use cache::FamilyCache;
pub use error::Error;
pub use json::{FromJson, MISSING_NUMBER, Record};
pub use search::{ScanPolicy, SearchWindow, WindowedSearch};
pub use traits::SearchSource;
pub use types::{ApiUrl, Environment, SearchQuery};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
