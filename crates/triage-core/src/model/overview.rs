//! The overview report, summarizing every task of a sample.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::Value;

use crate::json::{FromJson, Record, record};

use super::report::{Extract, ReportTaskFailure, Signature, TargetDesc};

record! {
    /// Summary of a sample across its static and behavioral tasks.
    pub struct TriageOverview {
        version: String = "version",
        sample: OverviewSample = "sample",
        /// Task summaries keyed by task id.
        tasks: BTreeMap<String, TaskSummary> = "tasks",
        analysis: OverviewAnalysis = "analysis",
        targets: Vec<OverviewTarget> = "targets",
        errors: Vec<ReportTaskFailure> = "errors",
        signatures: Vec<Signature> = "signatures",
        extracted: Vec<OverviewExtracted> = "extracted",
    }
}

impl TriageOverview {
    /// Every family name mentioned by the analysis or any target.
    pub fn families(&self) -> BTreeSet<&str> {
        self.analysis
            .family
            .iter()
            .chain(self.targets.iter().flat_map(|t| t.desc.family.iter()))
            .map(String::as_str)
            .filter(|f| !f.is_empty())
            .collect()
    }
}

/// The submitted sample, as described by the overview.
///
/// Submission and completion times live in the embedded [`TargetDesc`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewSample {
    #[serde(flatten)]
    pub desc: TargetDesc,
    pub created: String,
    pub iocs: OverviewIocs,
    #[serde(skip)]
    empty: bool,
}

impl FromJson for OverviewSample {
    fn absent() -> Self {
        Self {
            desc: TargetDesc::absent(),
            created: String::new(),
            iocs: OverviewIocs::absent(),
            empty: true,
        }
    }

    fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::absent();
        };
        Self {
            desc: TargetDesc::from_json(value),
            created: String::extract(object.get("created")),
            iocs: OverviewIocs::extract(object.get("iocs")),
            empty: false,
        }
    }
}

impl Record for OverviewSample {
    fn is_empty(&self) -> bool {
        self.empty
    }
}

impl Default for OverviewSample {
    fn default() -> Self {
        Self::absent()
    }
}

record! {
    pub struct OverviewIocs {
        urls: Vec<String> = "urls",
        domains: Vec<String> = "domains",
        ips: Vec<String> = "ips",
    }
}

record! {
    /// State and verdict of a single task.
    pub struct TaskSummary {
        sample: String = "sample",
        kind: String = "kind",
        name: String = "name",
        status: String = "status",
        ttp: Vec<String> = "ttp",
        tags: Vec<String> = "tags",
        score: i64 = "score",
        target: String = "target",
        backend: String = "backend",
        resource: String = "resource",
        platform: String = "platform",
        task_name: String = "task_name",
        failure: String = "failure",
        queue_id: i64 = "queue_id",
        pick: String = "pick",
    }
}

record! {
    pub struct OverviewAnalysis {
        score: i64 = "score",
        family: Vec<String> = "family",
        tags: Vec<String> = "tags",
    }
}

/// One analyzed target (the sample or an extracted member).
///
/// Family names live in the embedded [`TargetDesc`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewTarget {
    #[serde(flatten)]
    pub desc: TargetDesc,
    pub tasks: Vec<String>,
    pub tags: Vec<String>,
    pub signatures: Vec<Signature>,
    pub iocs: OverviewIocs,
    #[serde(skip)]
    empty: bool,
}

impl FromJson for OverviewTarget {
    fn absent() -> Self {
        Self {
            desc: TargetDesc::absent(),
            tasks: Vec::new(),
            tags: Vec::new(),
            signatures: Vec::new(),
            iocs: OverviewIocs::absent(),
            empty: true,
        }
    }

    fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::absent();
        };
        Self {
            desc: TargetDesc::from_json(value),
            tasks: Vec::extract(object.get("tasks")),
            tags: Vec::extract(object.get("tags")),
            signatures: Vec::extract(object.get("signatures")),
            iocs: OverviewIocs::extract(object.get("iocs")),
            empty: false,
        }
    }
}

impl Record for OverviewTarget {
    fn is_empty(&self) -> bool {
        self.empty
    }
}

impl Default for OverviewTarget {
    fn default() -> Self {
        Self::absent()
    }
}

/// An extraction, annotated with the tasks it was found in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewExtracted {
    #[serde(flatten)]
    pub extract: Extract,
    pub tasks: Vec<String>,
    #[serde(skip)]
    empty: bool,
}

impl FromJson for OverviewExtracted {
    fn absent() -> Self {
        Self {
            extract: Extract::absent(),
            tasks: Vec::new(),
            empty: true,
        }
    }

    fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::absent();
        };
        Self {
            extract: Extract::from_json(value),
            tasks: Vec::extract(object.get("tasks")),
            empty: false,
        }
    }
}

impl Record for OverviewExtracted {
    fn is_empty(&self) -> bool {
        self.empty
    }
}

impl Default for OverviewExtracted {
    fn default() -> Self {
        Self::absent()
    }
}
