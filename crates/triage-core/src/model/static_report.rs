//! Records of the static analysis report.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;

use crate::json::{FromJson, Record, record};

/// The static report of a sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaticReport {
    pub version: String,
    pub sample: SampleWrapper,
    /// Copied from [`SampleWrapper::target`].
    pub target: String,
    pub files: Vec<TriageFile>,
    pub analysis: StaticAnalysis,
    pub signatures: Vec<StaticSignature>,
    pub unpack_count: i64,
    pub error_count: i64,
    #[serde(skip)]
    empty: bool,
}

impl FromJson for StaticReport {
    fn absent() -> Self {
        Self {
            version: String::new(),
            sample: SampleWrapper::absent(),
            target: String::new(),
            files: Vec::new(),
            analysis: StaticAnalysis::absent(),
            signatures: Vec::new(),
            unpack_count: i64::absent(),
            error_count: i64::absent(),
            empty: true,
        }
    }

    fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::absent();
        };
        let sample = SampleWrapper::extract(object.get("sample"));
        Self {
            version: String::extract(object.get("version")),
            target: sample.target.clone(),
            sample,
            files: Vec::extract(object.get("files")),
            analysis: StaticAnalysis::extract(object.get("analysis")),
            signatures: Vec::extract(object.get("signatures")),
            unpack_count: i64::extract(object.get("unpack_count")),
            error_count: i64::extract(object.get("error_count")),
            empty: false,
        }
    }
}

impl Record for StaticReport {
    fn is_empty(&self) -> bool {
        self.empty
    }
}

impl Default for StaticReport {
    fn default() -> Self {
        Self::absent()
    }
}

impl StaticReport {
    /// The file selected for execution, if any.
    pub fn selected_file(&self) -> Option<&TriageFile> {
        self.files.iter().find(|f| f.selected)
    }
}

record! {
    pub struct SampleWrapper {
        sample: String = "sample",
        kind: String = "kind",
        size: i64 = "size",
        target: String = "target",
    }
}

record! {
    /// A file found in the submission (the sample itself or an archive member).
    pub struct TriageFile {
        filename: String = "filename",
        filesize: i64 = "filesize",
        md5: String = "md5",
        sha1: String = "sha1",
        sha256: String = "sha256",
        sha512: String = "sha512",
        extensions: Vec<String> = "exts",
        tags: Vec<String> = "tags",
        depth: i64 = "depth",
        kind: String = "kind",
        selected: bool = "selected",
        runas: String = "runas",
    }
}

/// Verdict of the static analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaticAnalysis {
    pub reported: String,
    pub score: i64,
    /// Distinct, non-empty tags.
    pub tags: BTreeSet<String>,
    #[serde(skip)]
    empty: bool,
}

impl FromJson for StaticAnalysis {
    fn absent() -> Self {
        Self {
            reported: String::new(),
            score: i64::absent(),
            tags: BTreeSet::new(),
            empty: true,
        }
    }

    fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::absent();
        };
        let mut tags = BTreeSet::<String>::extract(object.get("tags"));
        tags.remove("");
        Self {
            reported: String::extract(object.get("reported")),
            score: i64::extract(object.get("score")),
            tags,
            empty: false,
        }
    }
}

impl Record for StaticAnalysis {
    fn is_empty(&self) -> bool {
        self.empty
    }
}

impl Default for StaticAnalysis {
    fn default() -> Self {
        Self::absent()
    }
}

/// A static signature match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaticSignature {
    pub name: String,
    pub score: i64,
    /// Union of the signature's tags and the YARA rules of its indicators.
    pub tags: BTreeSet<String>,
    #[serde(skip)]
    empty: bool,
}

impl FromJson for StaticSignature {
    fn absent() -> Self {
        Self {
            name: String::new(),
            score: i64::absent(),
            tags: BTreeSet::new(),
            empty: true,
        }
    }

    fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::absent();
        };
        let mut tags = BTreeSet::<String>::extract(object.get("tags"));
        if let Some(Value::Array(indicators)) = object.get("indicators") {
            tags.extend(
                indicators
                    .iter()
                    .filter(|i| i.is_object())
                    .map(|i| String::extract(i.get("yara_rule"))),
            );
        }
        Self {
            name: String::extract(object.get("name")),
            score: i64::extract(object.get("score")),
            tags,
            empty: false,
        }
    }
}

impl Record for StaticSignature {
    fn is_empty(&self) -> bool {
        self.empty
    }
}

impl Default for StaticSignature {
    fn default() -> Self {
        Self::absent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{MISSING_NUMBER, parse};

    #[test]
    fn target_is_copied_from_sample() {
        let report: StaticReport = parse(Some(
            r#"{"version": "0.3", "sample": {"sample": "id", "kind": "file", "size": 5, "target": "a.zip"},
                "unpack_count": 2}"#,
        ))
        .unwrap();
        assert_eq!(report.target, "a.zip");
        assert_eq!(report.sample.size, 5);
        assert_eq!(report.unpack_count, 2);
        assert_eq!(report.error_count, MISSING_NUMBER);
    }

    #[test]
    fn missing_sample_leaves_target_empty() {
        let report: StaticReport = parse(Some(r#"{"files": [{"filename": "x"}]}"#)).unwrap();
        assert!(report.sample.is_empty());
        assert_eq!(report.target, "");
        assert_eq!(report.files[0].filesize, MISSING_NUMBER);
        assert!(report.selected_file().is_none());
    }

    #[test]
    fn analysis_tags_drop_blanks_and_duplicates() {
        let report: StaticReport = parse(Some(
            r#"{"analysis": {"score": 3, "tags": ["packed", "", "packed", "upx"]}}"#,
        ))
        .unwrap();
        let tags: Vec<_> = report.analysis.tags.iter().map(String::as_str).collect();
        assert_eq!(tags, vec!["packed", "upx"]);
    }

    #[test]
    fn signature_tags_merge_indicator_rules() {
        let report: StaticReport = parse(Some(
            r#"{"signatures": [
                {"name": "UPX", "score": 1, "tags": ["packer"],
                 "indicators": [{"yara_rule": "upx_packed"}, {"yara_rule": "packer"}, "junk"]},
                null
            ]}"#,
        ))
        .unwrap();
        let sig = &report.signatures[0];
        let tags: Vec<_> = sig.tags.iter().map(String::as_str).collect();
        assert_eq!(tags, vec!["packer", "upx_packed"]);
        assert!(report.signatures[1].is_empty());
    }

    #[test]
    fn selected_file() {
        let report: StaticReport = parse(Some(
            r#"{"files": [{"filename": "a"}, {"filename": "b", "selected": true}]}"#,
        ))
        .unwrap();
        assert_eq!(report.selected_file().unwrap().filename, "b");
    }
}
