//! The paging loop.

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use super::{MAX_PAGE_SIZE, ScanPolicy, SearchWindow, clamp_limit};
use crate::Result;
use crate::error::PreconditionError;
use crate::json;
use crate::model::{SearchPage, SearchResultEntry};
use crate::time;
use crate::traits::SearchSource;
use crate::types::SearchQuery;

/// Collects every search result completed inside a time window.
///
/// Pages are requested one at a time, newest first, starting from the
/// window's latest end. A failed fetch or an unparseable page aborts the
/// scan and nothing collected so far is returned.
///
/// # Example
///
/// ```no_run
/// # async fn demo(source: &impl triage_core::SearchSource) -> triage_core::Result<()> {
/// use chrono::{Duration, Utc};
/// use triage_core::{ScanPolicy, SearchQuery, SearchWindow, WindowedSearch};
///
/// let now = Utc::now();
/// let window = SearchWindow::new(&(now - Duration::days(1)), &now)?;
/// let query = SearchQuery::family("emotet")?;
/// let entries = WindowedSearch::new(source)
///     .limit(100)
///     .policy(ScanPolicy::SortedEarlyExit)
///     .run(&query, &window)
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct WindowedSearch<'a, S: SearchSource + ?Sized> {
    source: &'a S,
    limit: u32,
    policy: ScanPolicy,
}

impl<'a, S: SearchSource + ?Sized> WindowedSearch<'a, S> {
    /// A scan with the largest page size and the exhaustive policy.
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            limit: MAX_PAGE_SIZE,
            policy: ScanPolicy::default(),
        }
    }

    /// Set the page size, clamped to what the service accepts.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = clamp_limit(limit);
        self
    }

    pub fn policy(mut self, policy: ScanPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run the scan, validating the window against the current time.
    pub async fn run(
        &self,
        query: &SearchQuery,
        window: &SearchWindow,
    ) -> Result<Vec<SearchResultEntry>> {
        self.run_at(query, window, Utc::now()).await
    }

    /// Run the scan, validating the window against `now`.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::EarliestInFuture`] without contacting
    /// the source if the window starts after `now`. Source and parse
    /// failures are passed through unchanged.
    #[instrument(skip(self, query, window), fields(%query, limit = self.limit, policy = ?self.policy))]
    pub async fn run_at(
        &self,
        query: &SearchQuery,
        window: &SearchWindow,
        now: DateTime<Utc>,
    ) -> Result<Vec<SearchResultEntry>> {
        let now = time::normalize(&now);
        if window.earliest() > now {
            return Err(PreconditionError::EarliestInFuture {
                earliest: window.earliest(),
                now,
            }
            .into());
        }

        let mut offset = time::format_offset(window.latest());
        let mut matches = Vec::new();
        let mut pages = 0usize;

        loop {
            let body = self
                .source
                .fetch_page(query.as_str(), Some(&offset), self.limit)
                .await?;
            let page: SearchPage = json::parse_slice(&body)?;
            pages += 1;
            debug!(page = pages, %offset, entries = page.entries.len(), "Fetched search page");

            if page.is_exhausted() {
                break;
            }

            let before = window.page_before(&page.entries);
            let SearchPage {
                entries,
                next_offset,
                ..
            } = page;
            matches.extend(
                entries
                    .into_iter()
                    .filter(|entry| entry.completed_at().is_some_and(|t| window.contains(t))),
            );

            if window.is_instant() {
                break;
            }
            if before && self.policy == ScanPolicy::SortedEarlyExit {
                debug!("Page lies before the window, stopping early");
                break;
            }
            if next_offset.is_empty() || next_offset == offset {
                break;
            }
            offset = next_offset;
        }

        info!(pages, matches = matches.len(), "Search complete");
        Ok(matches)
    }
}
