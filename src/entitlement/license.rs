//! The license-backed entitlement gate.
//!
//! Free-tier users get a fixed number of lookups per calendar day. Paid
//! users hold an opaque license key validated against a remote endpoint;
//! the verdict is cached with a TTL so the remote call happens at most
//! once a day, and a push event keyed by subscription identifier can
//! invalidate the cached verdict early on cancellation or update.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::{Mutex, RwLock};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::EntitlementConfig;
use crate::error::{LicenseError, Result};

use super::{EntitlementGate, EntitlementState, TtlCache};

#[derive(Serialize)]
struct ValidateRequest<'a> {
    #[serde(rename = "licenseKey")]
    license_key: &'a str,
}

#[derive(Deserialize)]
struct ValidateResponse {
    valid: bool,
}

struct DailyUsage {
    day: NaiveDate,
    count: u32,
}

pub struct LicenseGate {
    client: Client,
    validate_url: String,
    license_key: Option<String>,
    free_daily_limit: u32,
    verdicts: TtlCache<String, bool>,
    /// Last verdict the remote ever returned, trusted when the remote is
    /// unreachable even past the TTL.
    last_known: RwLock<Option<bool>>,
    usage: Mutex<DailyUsage>,
}

impl LicenseGate {
    #[must_use]
    pub fn new(config: &EntitlementConfig) -> Self {
        Self {
            client: Client::new(),
            validate_url: config.validate_url.clone(),
            license_key: config.license_key.clone(),
            free_daily_limit: config.free_daily_limit,
            verdicts: TtlCache::new(Duration::from_secs(config.license_ttl_hours * 3600)),
            last_known: RwLock::new(None),
            usage: Mutex::new(DailyUsage {
                day: today(),
                count: 0,
            }),
        }
    }

    /// Invalidate the cached verdict for a subscription, ahead of its TTL.
    /// Fired by the backend on subscription cancellation or update.
    pub fn handle_subscription_event(&self, subscription_id: &str) {
        if self.verdicts.invalidate(&subscription_id.to_string()) {
            info!(
                subscription = subscription_id,
                "cached license verdict invalidated"
            );
        }
        if self.license_key.as_deref() == Some(subscription_id) {
            *self.last_known.write() = None;
        }
    }

    async fn is_license_valid(&self) -> bool {
        let Some(key) = self.license_key.as_deref() else {
            return false;
        };

        if let Some(valid) = self.verdicts.get(&key.to_string()) {
            return valid;
        }

        match self.validate_remote(key).await {
            Ok(valid) => {
                self.verdicts.set(key.to_string(), valid);
                *self.last_known.write() = Some(valid);
                valid
            }
            Err(err) => {
                warn!(error = %err, "license validation unreachable, trusting last verdict");
                (*self.last_known.read()).unwrap_or(false)
            }
        }
    }

    async fn validate_remote(&self, key: &str) -> Result<bool> {
        debug!("Validating license");

        let response = self
            .client
            .post(&self.validate_url)
            .json(&ValidateRequest { license_key: key })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LicenseError::ValidationFailed(format!("HTTP {status}")).into());
        }

        let verdict: ValidateResponse = response.json().await?;
        Ok(verdict.valid)
    }

    /// Reset the counter when the calendar day rolls over, then return
    /// today's count.
    fn usage_today(&self) -> u32 {
        let mut usage = self.usage.lock();
        let now = today();
        if usage.day != now {
            usage.day = now;
            usage.count = 0;
        }
        usage.count
    }

    fn record_lookup(&self) -> u32 {
        let mut usage = self.usage.lock();
        usage.count += 1;
        usage.count
    }
}

#[async_trait]
impl EntitlementGate for LicenseGate {
    async fn check(&self) -> EntitlementState {
        let count = self.usage_today();

        if self.is_license_valid().await {
            return EntitlementState {
                allowed: true,
                is_paid: true,
                count,
            };
        }

        if count >= self.free_daily_limit {
            return EntitlementState {
                allowed: false,
                is_paid: false,
                count,
            };
        }

        let count = self.record_lookup();
        EntitlementState {
            allowed: true,
            is_paid: false,
            count,
        }
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
impl LicenseGate {
    fn seed_verdict(&self, valid: bool) {
        if let Some(key) = self.license_key.as_deref() {
            self.verdicts.set(key.to_string(), valid);
        }
    }

    fn seed_usage(&self, day: NaiveDate, count: u32) {
        let mut usage = self.usage.lock();
        usage.day = day;
        usage.count = count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn free_config() -> EntitlementConfig {
        EntitlementConfig {
            license_key: None,
            ..EntitlementConfig::default()
        }
    }

    fn paid_config() -> EntitlementConfig {
        EntitlementConfig {
            license_key: Some("sub_123".into()),
            // Unroutable endpoint: any cache miss fails fast instead of
            // reaching out of the test environment.
            validate_url: "http://127.0.0.1:9/validate-license".into(),
            ..EntitlementConfig::default()
        }
    }

    #[tokio::test]
    async fn free_lookups_count_up_to_the_daily_limit() {
        let gate = LicenseGate::new(&free_config());

        for expected in 1..=10 {
            let state = gate.check().await;
            assert!(state.allowed);
            assert!(!state.is_paid);
            assert_eq!(state.count, expected);
        }

        let state = gate.check().await;
        assert!(!state.allowed);
        assert_eq!(state.count, 10);
    }

    #[tokio::test]
    async fn the_counter_resets_when_the_day_rolls_over() {
        let gate = LicenseGate::new(&free_config());
        let yesterday = today().pred_opt().unwrap();
        gate.seed_usage(yesterday, 10);

        let state = gate.check().await;
        assert!(state.allowed);
        assert_eq!(state.count, 1);
    }

    #[tokio::test]
    async fn cached_paid_verdict_skips_the_quota() {
        let gate = LicenseGate::new(&paid_config());
        gate.seed_verdict(true);
        gate.seed_usage(today(), 10);

        let state = gate.check().await;
        assert!(state.allowed);
        assert!(state.is_paid);
    }

    #[tokio::test]
    async fn cached_invalid_verdict_falls_back_to_the_quota() {
        let gate = LicenseGate::new(&paid_config());
        gate.seed_verdict(false);

        let state = gate.check().await;
        assert!(state.allowed);
        assert!(!state.is_paid);
        assert_eq!(state.count, 1);
    }

    #[tokio::test]
    async fn subscription_event_invalidates_the_cached_verdict() {
        let gate = LicenseGate::new(&paid_config());
        gate.seed_verdict(true);
        gate.seed_usage(today(), 10);

        gate.handle_subscription_event("sub_123");

        // With the verdict gone and the remote unreachable in tests, the
        // gate treats the user as free tier and the quota applies.
        let state = gate.check().await;
        assert!(!state.allowed);
        assert!(!state.is_paid);
    }
}
