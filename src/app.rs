//! Appraisal orchestration.
//!
//! Wires the entitlement gate, the sold-results fetch, the extraction
//! cascade, the comparable matcher, and the valuation math into one
//! pipeline invocation. All analysis is synchronous and pure; the only
//! asynchronous boundaries are the two collaborator calls (entitlement
//! check and markup fetch), and neither is ever retried here.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::domain::{
    flip_score, reject_outliers, summarize, AppraisalReport, ComparableMatcher, FilterConfig,
    ScoreConfig, SoldListing,
};
use crate::entitlement::{EntitlementGate, EntitlementState, LicenseGate};
use crate::extract::ExtractorCascade;
use crate::marketplace::{EbayClient, SoldResultsFetcher};

/// One appraisal pipeline, reusable across runs.
///
/// Each run operates on freshly fetched data; no state is shared between
/// overlapping runs.
pub struct Valuator {
    gate: Arc<dyn EntitlementGate>,
    fetcher: Arc<dyn SoldResultsFetcher>,
    cascade: ExtractorCascade,
    matcher: ComparableMatcher,
    filter: FilterConfig,
    score: ScoreConfig,
    free_daily_limit: u32,
}

impl Valuator {
    /// Wire the standard collaborators from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::with_collaborators(
            Arc::new(LicenseGate::new(&config.entitlement)),
            Arc::new(EbayClient::new(config.network.search_url.clone())),
            config,
        )
    }

    /// Wire explicit collaborators; used by tests to script the gate and
    /// the fetch.
    pub fn with_collaborators(
        gate: Arc<dyn EntitlementGate>,
        fetcher: Arc<dyn SoldResultsFetcher>,
        config: &Config,
    ) -> Self {
        Self {
            gate,
            fetcher,
            cascade: ExtractorCascade::for_site(&config.network.site_url),
            matcher: ComparableMatcher::new(config.matcher.clone()),
            filter: config.filter.clone(),
            score: config.score.clone(),
            free_daily_limit: config.entitlement.free_daily_limit,
        }
    }

    /// Run the pipeline for one query.
    ///
    /// Every failure path terminates in a report state; this never
    /// returns an error and never panics.
    pub async fn appraise(&self, query: &str, asking: Option<Decimal>) -> AppraisalReport {
        let state = self.gate.check().await;
        if !state.allowed {
            info!(count = state.count, "Lookup denied, daily limit reached");
            return AppraisalReport::limit_reached();
        }

        let markup = match self.fetcher.fetch_sold_results(query).await {
            Ok(markup) => markup,
            Err(err) => {
                warn!(error = %err, "Sold results fetch failed");
                return AppraisalReport::fetch_failed();
            }
        };

        let listings = self.cascade.extract(&markup);
        if listings.is_empty() {
            info!(query, "No sold listings extracted");
            return AppraisalReport::no_listings();
        }

        let extracted = listings.len();
        let comparables = self.comparables(query, listings);
        if comparables.is_empty() {
            info!(query, extracted, "No listing passed the comparable matcher");
            return AppraisalReport::no_comparables();
        }

        let kept = reject_outliers(comparables, &self.filter);
        let prices: Vec<Decimal> = kept.iter().map(|listing| listing.price).collect();
        let Some(stats) = summarize(&prices) else {
            // Unreachable with a non-empty kept list; report it as empty
            // rather than panicking.
            return AppraisalReport::no_comparables();
        };

        debug!(
            comparables = stats.count,
            avg = %stats.avg,
            median = %stats.median,
            "Valuation computed"
        );

        let score = match (state.is_paid, asking) {
            (true, Some(asking)) => flip_score(&stats, asking, &self.score),
            _ => None,
        };

        AppraisalReport::success(stats, score, kept, self.quota_note(&state))
    }

    /// Keep listings that describe the same item as the query.
    ///
    /// Price-only records from the fallback strategies carry no title to
    /// judge; they were extracted from the query's own result page, so
    /// they pass through rather than being rejected as unmatchable.
    fn comparables(&self, query: &str, listings: Vec<SoldListing>) -> Vec<SoldListing> {
        let signature = self.matcher.signature(query);
        listings
            .into_iter()
            .filter(|listing| {
                listing.title.is_empty() || self.matcher.is_comparable(&signature, &listing.title)
            })
            .collect()
    }

    fn quota_note(&self, state: &EntitlementState) -> Option<String> {
        if state.is_paid {
            return None;
        }
        let left = self.free_daily_limit.saturating_sub(state.count);
        Some(format!("{left} free lookups left today"))
    }
}
