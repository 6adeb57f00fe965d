//! Last-resort fallback: price-like key/value fragments in embedded JSON.

use regex::Regex;

use crate::domain::SoldListing;

use super::{ExtractStrategy, SearchPage};

/// Scans the raw markup for serialized price objects
/// (`"currentPrice": {... "value": 12.99 ...}` and friends), taking the
/// first value per fragment.
pub struct EmbeddedPrices {
    fragment: Regex,
}

impl EmbeddedPrices {
    pub fn new() -> Self {
        let pattern = concat!(
            r#""(?:currentPrice|price|convertedCurrentPrice)""#,
            r#"\s*:\s*\{[^}]*"value"\s*:\s*([0-9]+(?:\.[0-9]+)?)"#,
        );
        Self {
            fragment: Regex::new(pattern).expect("valid regex"),
        }
    }
}

impl Default for EmbeddedPrices {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractStrategy for EmbeddedPrices {
    fn name(&self) -> &'static str {
        "embedded_prices"
    }

    fn try_extract(&self, page: &SearchPage) -> Vec<SoldListing> {
        self.fragment
            .captures_iter(page.raw())
            .filter_map(|caps| caps.get(1))
            .filter_map(|value| value.as_str().parse().ok())
            .map(SoldListing::price_only)
            .collect()
    }
}
