//! triage-http - reqwest-backed client for the Triage sandbox API.
//!
//! [`TriageApi`] wraps every endpoint the client needs and implements
//! [`SearchSource`](triage_core::SearchSource), so it can drive a
//! [`WindowedSearch`](triage_core::WindowedSearch) directly.

mod api;
mod client;
pub mod endpoints;
mod key;

pub use api::TriageApi;
pub use client::{DEFAULT_TIMEOUT, HttpClient, transport_error};
pub use endpoints::Subset;
pub use key::ApiKey;
