//! Sold-listing extraction from search-results markup.
//!
//! Search-results pages are noisy and inconsistently structured: the
//! listing grid has shipped in at least two card layouts, and degraded
//! responses sometimes carry prices only inside embedded JSON. Extraction
//! is therefore a prioritized cascade of interchangeable strategies
//! sharing one contract — each gets the whole page and returns whatever
//! sold listings it can find, and the first non-empty result wins.
//!
//! Extraction never fails: a strategy that cannot parse an item skips that
//! item alone, and a cascade that finds nothing returns an empty list.

mod embedded_json;
mod item_cards;
mod linked_data;
mod price_markers;

pub use embedded_json::EmbeddedPrices;
pub use item_cards::{AlternateCards, PrimaryCards};
pub use linked_data::LinkedData;
pub use price_markers::PriceMarkers;

use regex::Regex;
use rust_decimal::Decimal;
use scraper::{ElementRef, Html};
use tracing::debug;
use url::Url;

use crate::domain::SoldListing;

/// Currency-amount pattern: integer with optional thousands separators
/// plus optional two-digit cents ("12", "12.99", "1,299.99").
pub(crate) const AMOUNT_PATTERN: &str = r"[\d,]+(?:\.\d{2})?";

/// A search-results page, parsed once and shared by every strategy.
pub struct SearchPage {
    raw: String,
    document: Html,
}

impl SearchPage {
    pub fn parse(markup: &str) -> Self {
        Self {
            raw: markup.to_string(),
            document: Html::parse_document(markup),
        }
    }

    /// The unparsed markup, for strategies that scan text fragments.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The parsed document, for selector-based strategies.
    pub fn document(&self) -> &Html {
        &self.document
    }
}

/// One way of pulling sold listings out of a results page.
pub trait ExtractStrategy: Send + Sync {
    /// Unique identifier for logging.
    fn name(&self) -> &'static str;

    /// Extract whatever listings this strategy can find. Returning an
    /// empty list hands the page to the next strategy in the cascade.
    fn try_extract(&self, page: &SearchPage) -> Vec<SoldListing>;
}

/// Ordered cascade of extraction strategies.
///
/// Strategies run in registration order; the first non-empty result is
/// returned and later strategies never run.
#[derive(Default)]
pub struct ExtractorCascade {
    strategies: Vec<Box<dyn ExtractStrategy>>,
}

impl ExtractorCascade {
    /// Create a new empty cascade.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard cascade: item cards first, then the alternate card
    /// layout, then the text and embedded-data fallbacks.
    pub fn for_site(site_url: &str) -> Self {
        let mut cascade = Self::new();
        cascade.register(Box::new(PrimaryCards::new(site_url)));
        cascade.register(Box::new(AlternateCards::new()));
        cascade.register(Box::new(PriceMarkers::new()));
        cascade.register(Box::new(LinkedData::new()));
        cascade.register(Box::new(EmbeddedPrices::new()));
        cascade
    }

    /// Register a strategy. Strategies are tried in registration order.
    pub fn register(&mut self, strategy: Box<dyn ExtractStrategy>) {
        self.strategies.push(strategy);
    }

    /// Run the cascade over raw markup.
    pub fn extract(&self, markup: &str) -> Vec<SoldListing> {
        let page = SearchPage::parse(markup);

        for strategy in &self.strategies {
            let listings = strategy.try_extract(&page);
            if !listings.is_empty() {
                debug!(
                    strategy = strategy.name(),
                    count = listings.len(),
                    "listings extracted"
                );
                return listings;
            }
        }

        Vec::new()
    }
}

/// First currency amount in a text fragment, commas stripped.
pub(crate) fn first_amount(amount: &Regex, text: &str) -> Option<Decimal> {
    amount
        .find(text)
        .and_then(|m| m.as_str().replace(',', "").parse().ok())
}

/// Element text with runs of whitespace collapsed.
pub(crate) fn collapse_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve protocol-relative and root-relative listing links against the
/// marketplace's canonical host. Unresolvable hrefs pass through as-is.
pub(crate) fn resolve_href(site_url: &str, href: &str) -> String {
    match Url::parse(site_url).and_then(|base| base.join(href)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => href.to_string(),
    }
}
