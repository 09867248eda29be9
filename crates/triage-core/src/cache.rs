//! Known malware families.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::TriageOverview;

/// Family names collected from overview reports.
///
/// The cache is an ordinary value: whoever creates it owns it, decides
/// when to refresh it and may persist it (it serializes to JSON).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyCache {
    families: BTreeSet<String>,
    refreshed_at: Option<DateTime<Utc>>,
}

impl FamilyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the families named by `overview`, returning how many were new.
    pub fn observe(&mut self, overview: &TriageOverview) -> usize {
        let before = self.families.len();
        self.families
            .extend(overview.families().into_iter().map(str::to_string));
        let added = self.families.len() - before;
        if added > 0 {
            debug!(added, total = self.families.len(), "Observed new families");
        }
        added
    }

    /// Replace the contents with the families named by `overviews`.
    pub fn refresh<'o>(
        &mut self,
        overviews: impl IntoIterator<Item = &'o TriageOverview>,
        now: DateTime<Utc>,
    ) {
        self.families.clear();
        for overview in overviews {
            self.observe(overview);
        }
        self.refreshed_at = Some(now);
        debug!(total = self.families.len(), "Family cache refreshed");
    }

    /// Family names in sorted order.
    pub fn families(&self) -> Vec<&str> {
        self.families.iter().map(String::as_str).collect()
    }

    pub fn contains(&self, family: &str) -> bool {
        self.families.contains(family)
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// When [`FamilyCache::refresh`] last ran.
    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    /// True if the cache was never refreshed, or not within `max_age`.
    pub fn is_stale(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        match self.refreshed_at {
            Some(at) => now - at > max_age,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json;
    use chrono::TimeZone;

    fn overview(analysis: &[&str], target: &[&str]) -> TriageOverview {
        json::parse(Some(
            &serde_json::json!({
                "analysis": { "family": analysis },
                "targets": [{ "family": target }],
            })
            .to_string(),
        ))
        .unwrap()
    }

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, h, 0, 0).unwrap()
    }

    #[test]
    fn observe_accumulates_sorted() {
        let mut cache = FamilyCache::new();
        assert_eq!(cache.observe(&overview(&["qakbot"], &["emotet"])), 2);
        assert_eq!(cache.observe(&overview(&["emotet"], &["agenttesla"])), 1);
        assert_eq!(cache.families(), ["agenttesla", "emotet", "qakbot"]);
        assert!(cache.contains("emotet"));
        assert_eq!(cache.refreshed_at(), None);
    }

    #[test]
    fn refresh_replaces() {
        let mut cache = FamilyCache::new();
        cache.observe(&overview(&["qakbot"], &[]));

        let fresh = [overview(&["redline"], &[])];
        cache.refresh(&fresh, at(10));

        assert_eq!(cache.families(), ["redline"]);
        assert_eq!(cache.refreshed_at(), Some(at(10)));
    }

    #[test]
    fn staleness() {
        let mut cache = FamilyCache::new();
        assert!(cache.is_stale(at(10), Duration::hours(1)));

        cache.refresh(std::iter::empty(), at(10));
        assert!(cache.is_empty());
        assert!(!cache.is_stale(at(11), Duration::hours(1)));
        assert!(cache.is_stale(at(12), Duration::hours(1)));
    }

    #[test]
    fn empty_overview_adds_nothing() {
        let mut cache = FamilyCache::new();
        let empty: TriageOverview = json::parse(None).unwrap();
        assert_eq!(cache.observe(&empty), 0);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn serializes() {
        let mut cache = FamilyCache::new();
        cache.refresh([&overview(&["emotet"], &[])], at(10));
        let text = serde_json::to_string(&cache).unwrap();
        let back: FamilyCache = serde_json::from_str(&text).unwrap();
        assert_eq!(back, cache);
    }
}
