//! Records returned by the sandbox API.
//!
//! All of them implement [`Record`](crate::json::Record): fields are never
//! absent, and `is_empty()` tells whether the record was backed by data.

mod network;
mod overview;
mod report;
mod sample;
mod search;
mod static_report;

pub use network::{
    DomainRequest, DomainResponse, NetworkFlow, NetworkReport, NetworkRequest, WebRequest,
    WebResponse,
};
pub use overview::{
    OverviewAnalysis, OverviewExtracted, OverviewIocs, OverviewSample, OverviewTarget,
    TaskSummary, TriageOverview,
};
pub use report::{
    Config, ConfigCredentials, ConfigKey, Dropper, DropperUrl, Dump, Extract, Indicator, Process,
    Ransom, ReportAnalysisInfo, ReportTaskFailure, Signature, TargetDesc, TriageReport,
};
pub use sample::{
    Event, FileUploadResult, Sample, SampleEvents, SampleList, SampleStatus, Task,
};
pub use search::{SearchPage, SearchResultEntry};
pub use static_report::{
    SampleWrapper, StaticAnalysis, StaticReport, StaticSignature, TriageFile,
};
