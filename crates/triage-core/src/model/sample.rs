//! Sample submissions and their lifecycle.

use serde::Serialize;
use serde_json::Value;

use crate::json::{FromJson, Record, record};

/// A submitted sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub id: String,
    pub status: String,
    pub kind: String,
    /// The submitted filename for `file` samples, the URL otherwise.
    pub target: String,
    pub private: bool,
    pub tasks: Vec<Task>,
    pub submitted: String,
    pub completed: String,
    #[serde(skip)]
    empty: bool,
}

impl Sample {
    /// Returns true if the sample was submitted as a file.
    pub fn is_file(&self) -> bool {
        self.kind.eq_ignore_ascii_case("file")
    }
}

impl FromJson for Sample {
    fn absent() -> Self {
        Self {
            id: String::new(),
            status: String::new(),
            kind: String::new(),
            target: String::new(),
            private: false,
            tasks: Vec::new(),
            submitted: String::new(),
            completed: String::new(),
            empty: true,
        }
    }

    fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::absent();
        };
        let kind = String::extract(object.get("kind"));
        let target_key = if kind.eq_ignore_ascii_case("file") {
            "filename"
        } else {
            "url"
        };
        Self {
            id: String::extract(object.get("id")),
            status: String::extract(object.get("status")),
            target: String::extract(object.get(target_key)),
            kind,
            private: bool::extract(object.get("private")),
            tasks: Vec::extract(object.get("tasks")),
            submitted: String::extract(object.get("submitted")),
            completed: String::extract(object.get("completed")),
            empty: false,
        }
    }
}

impl Record for Sample {
    fn is_empty(&self) -> bool {
        self.empty
    }
}

impl Default for Sample {
    fn default() -> Self {
        Self::absent()
    }
}

record! {
    /// One analysis task of a sample.
    pub struct Task {
        id: String = "id",
        status: String = "status",
        target: String = "target",
    }
}

record! {
    /// A listing of samples.
    pub struct SampleList {
        samples: Vec<Sample> = "data",
        next: String = "next",
    }
}

record! {
    /// Current processing status of a sample.
    pub struct SampleStatus {
        status: String = "status",
    }
}

record! {
    /// Acknowledgement returned after submitting a file.
    pub struct FileUploadResult {
        id: String = "id",
        status: String = "status",
        kind: String = "kind",
        filename: String = "filename",
        private: bool = "private",
        submitted: String = "submitted",
    }
}

record! {
    /// A sample together with the state of each of its tasks.
    pub struct SampleEvents {
        id: String = "id",
        status: String = "status",
        kind: String = "kind",
        filename: String = "filename",
        private: bool = "private",
        events: Vec<Event> = "tasks",
        submitted: String = "submitted",
        completed: String = "completed",
    }
}

record! {
    pub struct Event {
        id: String = "id",
        status: String = "status",
        target: String = "target",
        pick: String = "pick",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::parse;

    #[test]
    fn file_sample_uses_filename() {
        let sample: Sample = parse(Some(
            r#"{"id": "220121-abc", "kind": "file", "filename": "dropper.exe",
                "url": "ignored", "private": true,
                "tasks": [{"id": "behavioral1", "status": "reported"}]}"#,
        ))
        .unwrap();
        assert!(sample.is_file());
        assert_eq!(sample.target, "dropper.exe");
        assert!(sample.private);
        assert_eq!(sample.tasks.len(), 1);
        assert_eq!(sample.tasks[0].target, "");
    }

    #[test]
    fn url_sample_uses_url() {
        let sample: Sample =
            parse(Some(r#"{"kind": "url", "url": "http://bad.example/payload"}"#)).unwrap();
        assert!(!sample.is_file());
        assert_eq!(sample.target, "http://bad.example/payload");
        assert_eq!(sample.id, "");
    }

    #[test]
    fn sample_list_keeps_order() {
        let list: SampleList = parse(Some(
            r#"{"data": [{"id": "b"}, {"id": "a"}, {"id": "b"}], "next": "cursor"}"#,
        ))
        .unwrap();
        let ids: Vec<_> = list.samples.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "b"]);
        assert_eq!(list.next, "cursor");
    }

    #[test]
    fn events_come_from_tasks() {
        let events: SampleEvents = parse(Some(
            r#"{"id": "x", "tasks": [{"id": "static1", "pick": "main"}]}"#,
        ))
        .unwrap();
        assert_eq!(events.events[0].pick, "main");
        assert_eq!(events.completed, "");
    }

    #[test]
    fn empty_sample_default() {
        let sample = Sample::default();
        assert!(sample.is_empty());
        assert!(sample.tasks.is_empty());
    }
}
