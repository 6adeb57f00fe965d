//! Interquartile-range outlier rejection over matched sold prices.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::SoldListing;

/// Bounds for the outlier fence.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    /// Below this many samples the quartile estimate is too unstable to
    /// trust, and the filter is the identity.
    #[serde(default = "default_min_sample")]
    pub min_sample: usize,

    /// Fence width as a multiple of the interquartile range.
    #[serde(default = "default_iqr_multiplier")]
    pub iqr_multiplier: Decimal,
}

fn default_min_sample() -> usize {
    5
}

fn default_iqr_multiplier() -> Decimal {
    Decimal::new(15, 1) // 1.5
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_sample: default_min_sample(),
            iqr_multiplier: default_iqr_multiplier(),
        }
    }
}

/// Drop listings whose price falls outside the IQR fence.
///
/// Quartiles are nearest-rank (`floor(0.25·n)` / `floor(0.75·n)` into the
/// ascending sort), with no interpolation. If filtering would leave fewer
/// than `min_sample` listings, the unfiltered input is returned instead so
/// small or skewed samples are never pruned down to nothing.
pub fn reject_outliers(listings: Vec<SoldListing>, config: &FilterConfig) -> Vec<SoldListing> {
    if listings.len() < config.min_sample {
        return listings;
    }

    let mut sorted: Vec<Decimal> = listings.iter().map(|listing| listing.price).collect();
    sorted.sort();

    let n = sorted.len();
    let q1 = sorted[n / 4];
    let q3 = sorted[n * 3 / 4];
    let iqr = q3 - q1;

    let low = q1 - config.iqr_multiplier * iqr;
    let high = q3 + config.iqr_multiplier * iqr;

    let kept: Vec<SoldListing> = listings
        .iter()
        .filter(|listing| listing.price >= low && listing.price <= high)
        .cloned()
        .collect();

    if kept.len() < config.min_sample {
        return listings;
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn priced(prices: &[Decimal]) -> Vec<SoldListing> {
        prices.iter().map(|p| SoldListing::price_only(*p)).collect()
    }

    #[test]
    fn small_samples_pass_through_unchanged() {
        let config = FilterConfig::default();
        let listings = priced(&[dec!(10), dec!(5000), dec!(12), dec!(11)]);

        let kept = reject_outliers(listings.clone(), &config);
        assert_eq!(kept, listings);
    }

    #[test]
    fn fence_rejects_the_distant_price() {
        let config = FilterConfig::default();
        let listings = priced(&[
            dec!(10),
            dec!(12),
            dec!(11),
            dec!(13),
            dec!(14),
            dec!(12),
            dec!(1000),
        ]);

        let kept = reject_outliers(listings, &config);
        assert_eq!(kept.len(), 6);
        assert!(kept.iter().all(|l| l.price < dec!(100)));
    }

    #[test]
    fn over_pruned_result_falls_back_to_original() {
        // n=5: the fence rejects 1000, leaving 4 survivors. 4 < 5, so the
        // filter result is discarded and all five prices come back.
        let config = FilterConfig::default();
        let listings = priced(&[dec!(10), dec!(12), dec!(11), dec!(13), dec!(1000)]);

        let kept = reject_outliers(listings.clone(), &config);
        assert_eq!(kept, listings);
    }

    #[test]
    fn document_order_is_preserved() {
        let config = FilterConfig::default();
        let listings = priced(&[
            dec!(14),
            dec!(10),
            dec!(13),
            dec!(11),
            dec!(12),
            dec!(900),
            dec!(12),
        ]);

        let kept = reject_outliers(listings, &config);
        let prices: Vec<Decimal> = kept.iter().map(|l| l.price).collect();
        assert_eq!(
            prices,
            vec![dec!(14), dec!(10), dec!(13), dec!(11), dec!(12), dec!(12)]
        );
    }
}
