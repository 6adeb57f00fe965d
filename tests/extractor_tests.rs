//! Extraction-cascade behavior over full page fixtures.

mod support;

use rust_decimal_macros::dec;

use flipscan::extract::ExtractorCascade;

use support::results_page;

fn cascade() -> ExtractorCascade {
    ExtractorCascade::for_site("https://www.ebay.com")
}

#[test]
fn primary_cards_win_over_every_fallback() {
    let html = format!(
        r#"{}
        <div class="s-card"><span class="s-card__price">$55.00</span></div>
        <script type="application/ld+json">
          {{"@type":"ItemList","itemListElement":[{{"item":{{"offers":{{"price":1.23}}}}}}]}}
        </script>"#,
        results_page(&[("Sealed box", "$120.00")])
    );

    let listings = cascade().extract(&html);

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].price, dec!(120.00));
    assert_eq!(listings[0].title, "Sealed box");
    assert_eq!(listings[0].href, "https://www.ebay.com/itm/1");
}

#[test]
fn alternate_cards_contribute_only_without_primary_cards() {
    let html = r#"
        <html><body>
          <form><span class="s-card__price">$9.99</span></form>
          <div class="s-card">
            <span class="s-card__title">Alt layout listing</span>
            <span class="s-card__price">$75.50</span>
          </div>
        </body></html>
    "#;

    let listings = cascade().extract(html);

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].price, dec!(75.50));
    assert_eq!(listings[0].title, "Alt layout listing");
}

#[test]
fn marker_fragments_rescue_pages_with_unparsed_cards() {
    // No .s-item containers and no .s-card__price nodes, but the price
    // markup survives as inline fragments.
    let html = r#"
        <html><body>
          <span class="s-item__price">$19.99</span>
          <span class="s-item__price">$24.00</span>
        </body></html>
    "#;

    let listings = cascade().extract(html);

    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0].price, dec!(19.99));
    assert!(listings[0].title.is_empty());
}

#[test]
fn linked_data_yields_exactly_the_offered_prices() {
    // Zero item cards in either layout; one well-formed embedded item
    // list with two priced offers.
    let html = r#"
        <html><body>
          <div class="srp-river">nothing card-like here</div>
          <script type="application/ld+json">
          {
            "@type": "ItemList",
            "itemListElement": [
              {"item": {"name": "Offer one", "offers": {"price": 19.99}}},
              {"item": {"name": "Offer two", "offers": {"price": "24.50"}}}
            ]
          }
          </script>
        </body></html>
    "#;

    let listings = cascade().extract(html);

    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0].price, dec!(19.99));
    assert_eq!(listings[1].price, dec!(24.50));
}

#[test]
fn embedded_price_blobs_are_the_last_resort() {
    let html = r#"
        <html><body>
        <script>
          window.__state = {"itemCard":{"currentPrice":{"value":34.99,"currency":"USD"}}};
        </script>
        </body></html>
    "#;

    let listings = cascade().extract(html);

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].price, dec!(34.99));
}

#[test]
fn hopeless_markup_extracts_nothing() {
    let listings = cascade().extract("<html><body><p>totally unrelated</p></body></html>");
    assert!(listings.is_empty());
}
