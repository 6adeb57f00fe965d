//! Scripted collaborators and markup fixtures shared by the integration
//! tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use flipscan::entitlement::{EntitlementGate, EntitlementState};
use flipscan::error::{Error, Result};
use flipscan::marketplace::SoldResultsFetcher;

/// Gate that always answers with a fixed state.
pub struct ScriptedGate(pub EntitlementState);

#[async_trait]
impl EntitlementGate for ScriptedGate {
    async fn check(&self) -> EntitlementState {
        self.0
    }
}

pub fn free_state(count: u32) -> EntitlementState {
    EntitlementState {
        allowed: true,
        is_paid: false,
        count,
    }
}

pub fn paid_state() -> EntitlementState {
    EntitlementState {
        allowed: true,
        is_paid: true,
        count: 0,
    }
}

pub fn denied_state() -> EntitlementState {
    EntitlementState {
        allowed: false,
        is_paid: false,
        count: 10,
    }
}

/// Fetcher that replays canned markup (or a scripted failure) and counts
/// how often it was called.
pub struct ScriptedFetcher {
    markup: Option<String>,
    calls: AtomicUsize,
}

impl ScriptedFetcher {
    pub fn with_markup(markup: impl Into<String>) -> Self {
        Self {
            markup: Some(markup.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            markup: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SoldResultsFetcher for ScriptedFetcher {
    async fn fetch_sold_results(&self, _query: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.markup {
            Some(markup) => Ok(markup.clone()),
            None => Err(Error::Fetch("scripted failure".into())),
        }
    }
}

/// A results page in the primary card layout, one `(title, price)` card
/// per entry.
pub fn results_page(cards: &[(&str, &str)]) -> String {
    let mut body = String::from("<html><body><ul class=\"srp-results\">");
    for (title, price) in cards {
        body.push_str(&format!(
            r#"<li class="s-item">
                 <a class="s-item__link" href="/itm/1">
                   <span class="s-item__title">{title}</span>
                 </a>
                 <span class="s-item__price">{price}</span>
                 <span class="s-item__endedDate">Sold recently</span>
               </li>"#,
        ));
    }
    body.push_str("</ul></body></html>");
    body
}
