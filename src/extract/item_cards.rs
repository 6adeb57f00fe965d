//! Card-based extraction: the primary listing grid and the alternate card
//! layout the results page sometimes ships instead.

use regex::Regex;
use rust_decimal::Decimal;
use scraper::{ElementRef, Selector};

use crate::domain::SoldListing;

use super::{collapse_text, first_amount, resolve_href, ExtractStrategy, SearchPage, AMOUNT_PATTERN};

/// Title of the ad card injected at the top of empty result sets.
const PLACEHOLDER_TITLE: &str = "Shop on eBay";

/// Screen-reader suffix appended to card titles.
const NEW_WINDOW_PHRASE: &str = "Opens in a new window or tab";

/// Primary listing cards (`.s-item` containers).
pub struct PrimaryCards {
    site_url: String,
    amount: Regex,
    items: Selector,
    title: Selector,
    price: Selector,
    price_fallback: Selector,
    ended: Selector,
    ended_fallback: Selector,
    link: Selector,
}

impl PrimaryCards {
    pub fn new(site_url: &str) -> Self {
        Self {
            site_url: site_url.to_string(),
            amount: Regex::new(AMOUNT_PATTERN).expect("valid regex"),
            items: Selector::parse(".s-item").expect("valid selector"),
            title: Selector::parse(".s-item__title").expect("valid selector"),
            price: Selector::parse(".s-item__price").expect("valid selector"),
            price_fallback: Selector::parse(".BOLD").expect("valid selector"),
            ended: Selector::parse(".s-item__endedDate").expect("valid selector"),
            ended_fallback: Selector::parse(".POSITIVE").expect("valid selector"),
            link: Selector::parse("a.s-item__link").expect("valid selector"),
        }
    }
}

impl ExtractStrategy for PrimaryCards {
    fn name(&self) -> &'static str {
        "primary_cards"
    }

    fn try_extract(&self, page: &SearchPage) -> Vec<SoldListing> {
        let mut listings = Vec::new();

        for item in page.document().select(&self.items) {
            let title = item
                .select(&self.title)
                .next()
                .map(|el| collapse_text(&el))
                .unwrap_or_default();

            if title.contains(PLACEHOLDER_TITLE) {
                continue;
            }

            let price_text = item
                .select(&self.price)
                .next()
                .or_else(|| item.select(&self.price_fallback).next())
                .map(|el| collapse_text(&el))
                .unwrap_or_default();

            let Some(price) = first_amount(&self.amount, &price_text) else {
                continue;
            };

            let ended = item
                .select(&self.ended)
                .next()
                .or_else(|| item.select(&self.ended_fallback).next())
                .map(|el| collapse_text(&el))
                .unwrap_or_default();

            let href = item
                .select(&self.link)
                .next()
                .and_then(|el| el.value().attr("href"))
                .map(|href| resolve_href(&self.site_url, href))
                .unwrap_or_default();

            listings.push(SoldListing {
                price,
                title: title.replace(NEW_WINDOW_PHRASE, "").trim().to_string(),
                href,
                ended,
            });
        }

        listings
    }
}

/// Alternate card layout (`.s-card__price` elements).
///
/// Price elements with this class also appear inside the refine sidebar
/// and its filter forms; those are search-UI controls, not listings, and
/// are excluded by walking ancestors.
pub struct AlternateCards {
    amount: Regex,
    prices: Selector,
    card_title: Selector,
}

/// Ancestor classes that mark search-UI controls rather than listings.
const CONTROL_PANEL_CLASSES: [&str; 2] = ["x-refine__main", "srp-refine__panel"];

const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];

impl AlternateCards {
    pub fn new() -> Self {
        Self {
            amount: Regex::new(AMOUNT_PATTERN).expect("valid regex"),
            prices: Selector::parse(".s-card__price").expect("valid selector"),
            card_title: Selector::parse(".s-card__title").expect("valid selector"),
        }
    }

    fn in_search_controls(element: &ElementRef) -> bool {
        element.ancestors().any(|node| {
            node.value().as_element().is_some_and(|el| {
                el.name() == "form"
                    || el.attr("class").is_some_and(|classes| {
                        classes
                            .split_whitespace()
                            .any(|class| CONTROL_PANEL_CLASSES.contains(&class))
                    })
            })
        })
    }

    fn enclosing_card<'a>(element: &ElementRef<'a>) -> Option<ElementRef<'a>> {
        element.ancestors().find_map(|node| {
            let card = ElementRef::wrap(node)?;
            let classes = card.value().attr("class")?;
            classes
                .split_whitespace()
                .any(|class| class == "s-card")
                .then_some(card)
        })
    }
}

impl Default for AlternateCards {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractStrategy for AlternateCards {
    fn name(&self) -> &'static str {
        "alternate_cards"
    }

    fn try_extract(&self, page: &SearchPage) -> Vec<SoldListing> {
        let mut listings = Vec::new();

        for price_el in page.document().select(&self.prices) {
            if Self::in_search_controls(&price_el) {
                continue;
            }

            let text = collapse_text(&price_el);
            if !text.chars().any(|c| CURRENCY_SYMBOLS.contains(&c)) {
                continue;
            }
            // "$10.00 to $25.00" is a range, not a sale price.
            if text.to_lowercase().contains("to") {
                continue;
            }

            let Some(price) = first_amount(&self.amount, &text) else {
                continue;
            };
            if price <= Decimal::ZERO {
                continue;
            }

            let title = Self::enclosing_card(&price_el)
                .and_then(|card| card.select(&self.card_title).next())
                .map(|el| collapse_text(&el))
                .unwrap_or_default();

            listings.push(SoldListing {
                price,
                title,
                href: String::new(),
                ended: String::new(),
            });
        }

        listings
    }
}
