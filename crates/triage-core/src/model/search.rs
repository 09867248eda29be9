//! Search result pages.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::json::{FromJson, Record, record};
use crate::time;

record! {
    /// One page of search results.
    pub struct SearchPage {
        entries: Vec<SearchResultEntry> = "data",
        /// Continuation token for the next page; empty when the service sent none.
        next_offset: String = "next",
    }
}

impl SearchPage {
    /// A page with no entries ends the scan.
    pub fn is_exhausted(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A sample matching a search query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResultEntry {
    pub id: String,
    /// Task ids, without repeats.
    pub tasks: Vec<String>,
    pub kind: String,
    pub filename: String,
    pub private: bool,
    pub submitted: String,
    pub completed: String,
    #[serde(skip)]
    empty: bool,
}

impl SearchResultEntry {
    /// Completion time in UTC, if the service reported a parseable one.
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        time::parse_timestamp(&self.completed)
    }

    /// Submission time in UTC, if the service reported a parseable one.
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        time::parse_timestamp(&self.submitted)
    }
}

impl FromJson for SearchResultEntry {
    fn absent() -> Self {
        Self {
            id: String::new(),
            tasks: Vec::new(),
            kind: String::new(),
            filename: String::new(),
            private: false,
            submitted: String::new(),
            completed: String::new(),
            empty: true,
        }
    }

    fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::absent();
        };
        let mut tasks: Vec<String> = Vec::new();
        if let Some(Value::Array(items)) = object.get("tasks") {
            for item in items {
                let id = String::extract(item.get("id"));
                if !tasks.contains(&id) {
                    tasks.push(id);
                }
            }
        }
        Self {
            id: String::extract(object.get("id")),
            tasks,
            kind: String::extract(object.get("kind")),
            filename: String::extract(object.get("filename")),
            private: bool::extract(object.get("private")),
            submitted: String::extract(object.get("submitted")),
            completed: String::extract(object.get("completed")),
            empty: false,
        }
    }
}

impl Record for SearchResultEntry {
    fn is_empty(&self) -> bool {
        self.empty
    }
}

impl Default for SearchResultEntry {
    fn default() -> Self {
        Self::absent()
    }
}
