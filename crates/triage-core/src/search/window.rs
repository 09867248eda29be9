//! The time range a search is restricted to.

use chrono::{DateTime, TimeZone, Utc};

use crate::Result;
use crate::error::PreconditionError;
use crate::model::SearchResultEntry;
use crate::time;

/// A range of completion times, normalized to UTC.
///
/// Membership is exclusive at both ends: an entry completed exactly at
/// `earliest` or `latest` is not in the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchWindow {
    earliest: DateTime<Utc>,
    latest: DateTime<Utc>,
}

impl SearchWindow {
    /// Build a window from two zoned times.
    ///
    /// Both ends are converted to UTC, whatever zone they arrive in.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::InvertedWindow`] if `earliest` is later
    /// than `latest`.
    pub fn new<Tz1: TimeZone, Tz2: TimeZone>(
        earliest: &DateTime<Tz1>,
        latest: &DateTime<Tz2>,
    ) -> Result<Self> {
        let earliest = time::normalize(earliest);
        let latest = time::normalize(latest);
        if earliest > latest {
            return Err(PreconditionError::InvertedWindow { earliest, latest }.into());
        }
        Ok(Self { earliest, latest })
    }

    pub fn earliest(&self) -> DateTime<Utc> {
        self.earliest
    }

    pub fn latest(&self) -> DateTime<Utc> {
        self.latest
    }

    /// True if `time` lies strictly between the two ends.
    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        self.earliest < time && time < self.latest
    }

    /// True if both ends are the same instant.
    ///
    /// Such a window can hold no entry, and is scanned with a single fetch.
    pub fn is_instant(&self) -> bool {
        self.earliest == self.latest
    }

    /// True if the first and last entries of a page both completed before
    /// `earliest`.
    ///
    /// A page entirely after `latest` does not count: with newest-first
    /// ordering the following pages may still reach into the range.
    /// Entries without a parseable completion time never satisfy this.
    pub(crate) fn page_before(&self, entries: &[SearchResultEntry]) -> bool {
        let (Some(first), Some(last)) = (entries.first(), entries.last()) else {
            return false;
        };
        let (Some(first), Some(last)) = (first.completed_at(), last.completed_at()) else {
            return false;
        };
        first < self.earliest && last < self.earliest
    }
}
