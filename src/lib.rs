//! Flipscan - resale valuation from completed marketplace sales.
//!
//! This crate estimates the fair resale value of a marketplace item by
//! finding truly comparable completed sales in a noisy search-results
//! page, rejecting mismatched listings and statistical outliers, and
//! deriving valuation statistics plus a normalized flip score.
//!
//! # Architecture
//!
//! The analysis pipeline is a chain of small pure stages:
//!
//! - **[`domain::TitleAnalyzer`]** - distills a raw title into matchable
//!   signals (token set, quantity, language, required tokens)
//! - **[`extract`]** - a prioritized cascade of extraction strategies
//!   sharing one contract, tried in order until one finds listings
//! - **[`domain::ComparableMatcher`]** - multi-signal decision separating
//!   genuine comparables from superficially similar listings
//! - **[`domain::reject_outliers`]** - interquartile-range price fence
//! - **[`domain::summarize`] / [`domain::flip_score`]** - valuation
//!   statistics and the 0-100 resale-margin score
//!
//! External collaborators sit behind ports: the sold-results fetch
//! ([`marketplace::SoldResultsFetcher`]) and the quota/entitlement
//! authority ([`entitlement::EntitlementGate`]). [`app::Valuator`] wires
//! everything into one pipeline invocation producing an
//! [`domain::AppraisalReport`], an owned render-state value the CLI
//! turns into text.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Marketplace-agnostic valuation logic
//! - [`error`] - Error types for the crate
//! - [`extract`] - Sold-listing extraction cascade
//! - [`marketplace`] - Search-page fetch port and eBay adapter
//! - [`entitlement`] - Free-tier quota and license validation
//! - [`app`] - Pipeline orchestration
//! - [`watch`] - Debounced re-runs for watch mode
//! - [`cli`] - Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use flipscan::app::Valuator;
//! use flipscan::config::Config;
//!
//! # async fn demo() {
//! let config = Config::default();
//! let valuator = Valuator::from_config(&config);
//! let report = valuator.appraise("Pokemon Jumbo Booster Box (English)", None).await;
//! # }
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod entitlement;
pub mod error;
pub mod extract;
pub mod marketplace;
pub mod watch;
