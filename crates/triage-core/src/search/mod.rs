//! Time-windowed search across paginated results.
//!
//! A [`WindowedSearch`] walks the service's search pages from the latest
//! end of a [`SearchWindow`] backwards, keeping every entry completed
//! strictly inside the window.

mod scan;
mod window;

pub use scan::WindowedSearch;
pub use window::SearchWindow;

/// Smallest page size the service accepts.
pub const MIN_PAGE_SIZE: u32 = 1;

/// Largest page size the service accepts.
pub const MAX_PAGE_SIZE: u32 = 200;

/// Clamp a requested page size into `[MIN_PAGE_SIZE, MAX_PAGE_SIZE]`.
pub fn clamp_limit(limit: u32) -> u32 {
    limit.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE)
}

/// When a scan may stop before the service runs out of pages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanPolicy {
    /// Follow continuation tokens until an empty page or a missing token.
    #[default]
    Exhaustive,
    /// Additionally stop once a page lies entirely before the window.
    ///
    /// Only correct when pages are ordered by descending completion time.
    /// Pages entirely after the window never stop the scan.
    SortedEarlyExit,
}
