//! Structured-data fallback: embedded `application/ld+json` item lists.

use rust_decimal::Decimal;
use scraper::Selector;
use serde_json::Value;

use crate::domain::SoldListing;

use super::{ExtractStrategy, SearchPage};

/// Walks embedded linked-data blocks for `ItemList` entries with priced
/// offers. Malformed JSON blocks are skipped silently, never fatal.
pub struct LinkedData {
    scripts: Selector,
}

impl LinkedData {
    pub fn new() -> Self {
        Self {
            scripts: Selector::parse(r#"script[type="application/ld+json"]"#)
                .expect("valid selector"),
        }
    }

    fn collect_item_list(object: &Value, out: &mut Vec<SoldListing>) {
        if object.get("@type").and_then(Value::as_str) != Some("ItemList") {
            return;
        }
        let Some(elements) = object.get("itemListElement").and_then(Value::as_array) else {
            return;
        };

        for element in elements {
            // Entries are either wrapped ListItems or the items themselves.
            let item = element.get("item").unwrap_or(element);
            let Some(price) = Self::offer_price(item) else {
                continue;
            };
            let title = item
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();

            out.push(SoldListing {
                price,
                title,
                href: String::new(),
                ended: String::new(),
            });
        }
    }

    fn offer_price(item: &Value) -> Option<Decimal> {
        let offers = item.get("offers")?;
        let offer = match offers.as_array() {
            Some(list) => list.first()?,
            None => offers,
        };
        Self::decimal_price(offer.get("price")?)
    }

    /// Prices appear both as JSON numbers and as strings, sometimes with
    /// thousands separators.
    fn decimal_price(price: &Value) -> Option<Decimal> {
        match price {
            Value::Number(number) => number.to_string().parse().ok(),
            Value::String(text) => text.replace(',', "").parse().ok(),
            _ => None,
        }
    }
}

impl Default for LinkedData {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractStrategy for LinkedData {
    fn name(&self) -> &'static str {
        "linked_data"
    }

    fn try_extract(&self, page: &SearchPage) -> Vec<SoldListing> {
        let mut listings = Vec::new();

        for script in page.document().select(&self.scripts) {
            let text: String = script.text().collect();
            if text.trim().is_empty() {
                continue;
            }
            let Ok(data) = serde_json::from_str::<Value>(&text) else {
                continue;
            };

            match data {
                Value::Array(objects) => {
                    for object in &objects {
                        Self::collect_item_list(object, &mut listings);
                    }
                }
                object => Self::collect_item_list(&object, &mut listings),
            }
        }

        listings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn extract(html: &str) -> Vec<SoldListing> {
        LinkedData::new().try_extract(&SearchPage::parse(html))
    }

    #[test]
    fn item_list_offers_yield_listings() {
        let html = r#"
            <script type="application/ld+json">
            {
              "@type": "ItemList",
              "itemListElement": [
                {"item": {"name": "Card A", "offers": {"price": 19.99}}},
                {"item": {"name": "Card B", "offers": {"price": "24.50"}}}
              ]
            }
            </script>
        "#;

        let listings = extract(html);
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].price, dec!(19.99));
        assert_eq!(listings[0].title, "Card A");
        assert_eq!(listings[1].price, dec!(24.50));
    }

    #[test]
    fn top_level_arrays_and_unwrapped_items_are_walked() {
        let html = r#"
            <script type="application/ld+json">
            [
              {"@type": "WebSite", "name": "ignored"},
              {
                "@type": "ItemList",
                "itemListElement": [
                  {"name": "Unwrapped", "offers": {"price": "1,050.00"}}
                ]
              }
            ]
            </script>
        "#;

        let listings = extract(html);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].price, dec!(1050.00));
        assert_eq!(listings[0].title, "Unwrapped");
    }

    #[test]
    fn malformed_blocks_are_skipped_silently() {
        let html = r#"
            <script type="application/ld+json">{not json at all</script>
            <script type="application/ld+json">
            {
              "@type": "ItemList",
              "itemListElement": [
                {"item": {"name": "Survivor", "offers": {"price": 5}}}
              ]
            }
            </script>
        "#;

        let listings = extract(html);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].title, "Survivor");
    }

    #[test]
    fn offers_without_prices_are_skipped() {
        let html = r#"
            <script type="application/ld+json">
            {
              "@type": "ItemList",
              "itemListElement": [
                {"item": {"name": "No offer"}},
                {"item": {"name": "Null price", "offers": {"price": null}}}
              ]
            }
            </script>
        "#;

        assert!(extract(html).is_empty());
    }
}
