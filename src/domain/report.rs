//! The owned render-state value handed to the presentation layer.

use serde::Serialize;

use super::{SoldListing, ValuationStats};

/// Outcome of one appraisal run.
///
/// Terminal failure states (`error`, `limit_reached`) are distinct from a
/// successful-but-empty result: "nothing sold" and "nothing comparable
/// sold" arrive as notes on an otherwise empty report, so the caller can
/// tell them apart from a fetch that never produced markup.
#[derive(Debug, Clone, Serialize)]
pub struct AppraisalReport {
    pub stats: Option<ValuationStats>,
    pub flip_score: Option<u8>,
    pub comparables: Vec<SoldListing>,
    pub note: Option<String>,
    pub error: Option<String>,
    pub limit_reached: bool,
}

impl AppraisalReport {
    fn empty() -> Self {
        Self {
            stats: None,
            flip_score: None,
            comparables: Vec::new(),
            note: None,
            error: None,
            limit_reached: false,
        }
    }

    /// The entitlement gate denied the run before any fetch.
    pub fn limit_reached() -> Self {
        Self {
            limit_reached: true,
            ..Self::empty()
        }
    }

    /// The sold-results fetch failed; never retried here.
    pub fn fetch_failed() -> Self {
        Self {
            error: Some("could not load sold data".into()),
            ..Self::empty()
        }
    }

    /// Every extraction strategy came back empty.
    pub fn no_listings() -> Self {
        Self {
            note: Some("no recent sold listings found".into()),
            ..Self::empty()
        }
    }

    /// Listings existed but none passed the comparable matcher.
    pub fn no_comparables() -> Self {
        Self {
            note: Some("no closely matching sold listings found".into()),
            ..Self::empty()
        }
    }

    pub fn success(
        stats: ValuationStats,
        flip_score: Option<u8>,
        comparables: Vec<SoldListing>,
        note: Option<String>,
    ) -> Self {
        Self {
            stats: Some(stats),
            flip_score,
            comparables,
            note,
            error: None,
            limit_reached: false,
        }
    }
}
