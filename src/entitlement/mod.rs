//! Entitlement gating: free-tier quota and license validation.
//!
//! The valuation pipeline consults the gate before fetching anything;
//! a denied check short-circuits the run into the limit-reached state.

mod cache;
mod license;

pub use cache::TtlCache;
pub use license::LicenseGate;

use async_trait::async_trait;

/// Allow/deny verdict plus tier for one lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitlementState {
    /// Whether this lookup may proceed.
    pub allowed: bool,
    /// Paid licenses unlock the flip score and skip the daily quota.
    pub is_paid: bool,
    /// Lookups consumed today (free tier).
    pub count: u32,
}

/// The quota/entitlement authority, checked before every fetch.
#[async_trait]
pub trait EntitlementGate: Send + Sync {
    async fn check(&self) -> EntitlementState;
}
