//! Search source trait.

use async_trait::async_trait;

use crate::Result;

/// Something that can return one page of search results.
///
/// Implementations issue a single request and hand back the raw JSON body;
/// decoding is left to the caller. Authentication and retries are the
/// implementation's business.
#[async_trait]
pub trait SearchSource: Send + Sync {
    /// Fetch one page for `query`, continuing from `offset` when given.
    async fn fetch_page(&self, query: &str, offset: Option<&str>, limit: u32) -> Result<Vec<u8>>;
}

#[async_trait]
impl<T: SearchSource + ?Sized> SearchSource for &T {
    async fn fetch_page(&self, query: &str, offset: Option<&str>, limit: u32) -> Result<Vec<u8>> {
        (**self).fetch_page(query, offset, limit).await
    }
}
