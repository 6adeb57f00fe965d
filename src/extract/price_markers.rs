//! Text-scan fallback for pages whose card markup failed to parse.

use regex::Regex;

use crate::domain::SoldListing;

use super::{first_amount, ExtractStrategy, SearchPage, AMOUNT_PATTERN};

/// Scans the raw markup for price-marker fragments.
///
/// Runs when neither card layout produced listings, which usually means
/// the DOM shape changed but the class names still appear in the text.
/// Produces price-only records.
pub struct PriceMarkers {
    marker: Regex,
    amount: Regex,
}

impl PriceMarkers {
    pub fn new() -> Self {
        Self {
            marker: Regex::new(r"s-item__price[^>]*>([^<]+)<").expect("valid regex"),
            amount: Regex::new(AMOUNT_PATTERN).expect("valid regex"),
        }
    }
}

impl Default for PriceMarkers {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractStrategy for PriceMarkers {
    fn name(&self) -> &'static str {
        "price_markers"
    }

    fn try_extract(&self, page: &SearchPage) -> Vec<SoldListing> {
        self.marker
            .captures_iter(page.raw())
            .filter_map(|caps| caps.get(1))
            .filter_map(|fragment| first_amount(&self.amount, fragment.as_str()))
            .map(SoldListing::price_only)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn prices_are_scraped_from_marker_fragments() {
        let html = r#"
            <span class="s-item__price somemod">$19.99</span>
            <span class="s-item__price">$1,250.00</span>
        "#;

        let listings = PriceMarkers::new().try_extract(&SearchPage::parse(html));
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].price, dec!(19.99));
        assert_eq!(listings[1].price, dec!(1250.00));
        assert!(listings[0].title.is_empty());
    }

    #[test]
    fn fragments_without_amounts_are_skipped() {
        let html = r#"<span class="s-item__price">see description</span>"#;

        let listings = PriceMarkers::new().try_extract(&SearchPage::parse(html));
        assert!(listings.is_empty());
    }
}
