//! Marketplace-agnostic valuation logic.

mod listing;
mod matcher;
mod money;
mod outlier;
mod report;
mod signature;
mod valuation;

pub use listing::SoldListing;
pub use matcher::{ComparableMatcher, MatcherConfig};
pub use money::Price;
pub use outlier::{reject_outliers, FilterConfig};
pub use report::AppraisalReport;
pub use signature::{Language, QuerySignature, TitleAnalyzer};
pub use valuation::{flip_score, summarize, ScoreConfig, ValuationStats};
