//! eBay search client.

use async_trait::async_trait;
use reqwest::header::ACCEPT_LANGUAGE;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::error::{Error, Result};

use super::SoldResultsFetcher;

/// HTTP client for the completed/sold listings search page.
pub struct EbayClient {
    client: Client,
    search_url: String,
}

impl EbayClient {
    /// Create a new client against the given search endpoint
    /// (e.g. `https://www.ebay.com/sch/i.html`).
    #[must_use]
    pub fn new(search_url: String) -> Self {
        Self {
            client: Client::new(),
            search_url,
        }
    }

    fn search_url(&self, query: &str) -> Result<Url> {
        let mut url = Url::parse(&self.search_url)?;
        url.query_pairs_mut()
            .append_pair("_nkw", query)
            .append_pair("LH_Sold", "1")
            .append_pair("LH_Complete", "1");
        Ok(url)
    }
}

#[async_trait]
impl SoldResultsFetcher for EbayClient {
    async fn fetch_sold_results(&self, query: &str) -> Result<String> {
        let url = self.search_url(query)?;

        info!(url = %url, "Fetching sold results");

        let response = self
            .client
            .get(url)
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("HTTP {status}")));
        }

        let markup = response.text().await?;
        debug!(bytes = markup.len(), "Fetched results page");

        Ok(markup)
    }
}
