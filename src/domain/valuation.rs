//! Valuation statistics and the flip score.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Summary statistics over the surviving comparable prices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationStats {
    pub avg: Decimal,
    pub median: Decimal,
    pub min: Decimal,
    pub max: Decimal,
    pub count: usize,
}

/// Constants mapping the average-to-asking ratio onto the 0–100 score.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreConfig {
    /// Ratio that maps to a score of zero (asking double the average).
    #[serde(default = "default_floor_ratio")]
    pub floor_ratio: Decimal,

    /// Width of the ratio band that spans the full score range.
    #[serde(default = "default_ratio_span")]
    pub ratio_span: Decimal,
}

fn default_floor_ratio() -> Decimal {
    Decimal::new(5, 1) // 0.5
}

fn default_ratio_span() -> Decimal {
    Decimal::new(15, 1) // 1.5
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            floor_ratio: default_floor_ratio(),
            ratio_span: default_ratio_span(),
        }
    }
}

/// Compute summary statistics over a price list.
///
/// The median is the element at `floor(n/2)` of the ascending sort: even
/// lengths take the upper-middle element rather than interpolating, so the
/// median is always a price that actually occurred.
pub fn summarize(prices: &[Decimal]) -> Option<ValuationStats> {
    if prices.is_empty() {
        return None;
    }

    let mut sorted = prices.to_vec();
    sorted.sort();

    let sum: Decimal = sorted.iter().sum();
    let count = sorted.len();

    Some(ValuationStats {
        avg: sum / Decimal::from(count as u64),
        median: sorted[count / 2],
        min: sorted[0],
        max: sorted[count - 1],
        count,
    })
}

/// Score the resale margin on a 0–100 scale.
///
/// `ratio = avg / asking` maps linearly from `floor_ratio` (score 0, the
/// asking price is double the historical average) across `ratio_span` to
/// 100 (asking half the average), clamped at both ends. A non-positive
/// asking price yields no score rather than zero.
pub fn flip_score(stats: &ValuationStats, asking: Decimal, config: &ScoreConfig) -> Option<u8> {
    if asking <= Decimal::ZERO {
        return None;
    }

    let ratio = stats.avg / asking;
    let raw = (ratio - config.floor_ratio) / config.ratio_span * Decimal::ONE_HUNDRED;
    let score = raw
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);

    score.to_u8()
}
