//! Sold-listing records produced by the extraction cascade.

use serde::Serialize;

use super::Price;

/// A single completed sale pulled out of the search-results markup.
///
/// Records are per-invocation and discarded after the appraisal run.
/// Fallback extraction strategies produce price-only records with empty
/// `title`, `href`, and `ended` fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoldListing {
    pub price: Price,
    pub title: String,
    pub href: String,
    pub ended: String,
}

impl SoldListing {
    /// A record carrying only a price, as produced by the text-scan
    /// fallbacks.
    pub fn price_only(price: Price) -> Self {
        Self {
            price,
            title: String::new(),
            href: String::new(),
            ended: String::new(),
        }
    }
}
