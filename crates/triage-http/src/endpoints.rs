//! Endpoint paths and request/response types.
//!
//! Paths are relative to the API base URL.

use serde::{Deserialize, Serialize};
use triage_core::Result;
use triage_core::error::InvalidInputError;

// ============================================================================
// Endpoint Paths
// ============================================================================

pub const SEARCH: &str = "search";

pub const SAMPLES: &str = "samples";

pub fn sample(id: &str) -> Result<String> {
    Ok(format!("samples/{}", sample_id(id)?))
}

pub fn sample_status(id: &str) -> Result<String> {
    Ok(format!("samples/{}/status", sample_id(id)?))
}

pub fn sample_events(id: &str) -> Result<String> {
    Ok(format!("samples/{}/events", sample_id(id)?))
}

pub fn sample_file(id: &str) -> Result<String> {
    Ok(format!("samples/{}/sample", sample_id(id)?))
}

pub fn static_report(id: &str) -> Result<String> {
    Ok(format!("samples/{}/reports/static", sample_id(id)?))
}

pub fn overview(id: &str) -> Result<String> {
    Ok(format!("samples/{}/overview.json", sample_id(id)?))
}

pub fn triage_report(id: &str, task: &str) -> Result<String> {
    Ok(format!("samples/{}/{}/report_triage.json", sample_id(id)?, task_id(task)?))
}

pub fn kernel_monitor_log(id: &str, task: &str) -> Result<String> {
    Ok(format!("samples/{}/{}/logs/onemon.json", sample_id(id)?, task_id(task)?))
}

pub fn pcap(id: &str, task: &str) -> Result<String> {
    Ok(format!("samples/{}/{}/dump.pcap", sample_id(id)?, task_id(task)?))
}

pub fn pcapng(id: &str, task: &str) -> Result<String> {
    Ok(format!("samples/{}/{}/dump.pcapng", sample_id(id)?, task_id(task)?))
}

fn sample_id(id: &str) -> Result<&str> {
    path_segment("sample", id)
}

fn task_id(id: &str) -> Result<&str> {
    path_segment("task", id)
}

/// Ids are spliced into paths as-is, so only characters that cannot
/// change the path are accepted.
fn path_segment<'a>(kind: &'static str, id: &'a str) -> Result<&'a str> {
    let reason = if id.is_empty() {
        "must not be empty"
    } else if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        "may only contain ASCII letters, digits, '-' and '_'"
    } else {
        return Ok(id);
    };
    Err(InvalidInputError::Id {
        kind,
        value: id.to_string(),
        reason: reason.to_string(),
    }
    .into())
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for the search endpoint.
#[derive(Debug, Serialize)]
pub struct SearchParams<'a> {
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<&'a str>,
    pub limit: u32,
}

/// Which samples to list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Subset {
    /// Samples submitted with this key.
    Owned,
    /// The latest public submissions.
    #[default]
    Public,
}

/// Query parameters for the sample listing endpoint.
#[derive(Debug, Serialize)]
pub struct ListParams {
    pub subset: Subset,
}

/// The `_json` part of a sample upload.
#[derive(Debug, Serialize)]
pub struct UploadRequest<'a> {
    pub kind: &'a str,
    pub interactive: bool,
}

impl Default for UploadRequest<'_> {
    fn default() -> Self {
        Self {
            kind: "file",
            interactive: false,
        }
    }
}

/// Error body sent with non-success statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
    pub message: Option<String>,
}
