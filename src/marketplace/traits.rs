//! Trait definition for the page-content collaborator.

use async_trait::async_trait;

use crate::error::Result;

/// Fetches the completed/sold search-results markup for a query.
///
/// Single-shot request/response: the valuation core never retries a
/// failed fetch, it surfaces the failure as a terminal display state.
/// Retry policy, if any, belongs to the implementation.
#[async_trait]
pub trait SoldResultsFetcher: Send + Sync {
    async fn fetch_sold_results(&self, query: &str) -> Result<String>;
}
