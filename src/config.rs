//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with environment variable
//! overrides for sensitive values like `FLIPSCAN_LICENSE_KEY`.

use serde::Deserialize;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

use crate::domain::{FilterConfig, MatcherConfig, ScoreConfig};
use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub score: ScoreConfig,
    #[serde(default)]
    pub entitlement: EntitlementConfig,
    #[serde(default)]
    pub watch: WatchConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    /// Completed/sold search endpoint.
    #[serde(default = "default_search_url")]
    pub search_url: String,
    /// Canonical marketplace host, used to resolve relative listing links.
    #[serde(default = "default_site_url")]
    pub site_url: String,
}

fn default_search_url() -> String {
    "https://www.ebay.com/sch/i.html".into()
}

fn default_site_url() -> String {
    "https://www.ebay.com".into()
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            site_url: default_site_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Free-tier quota and license validation settings.
///
/// The license key is loaded from the `FLIPSCAN_LICENSE_KEY` env var at
/// runtime, never from the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct EntitlementConfig {
    /// Lookups allowed per calendar day on the free tier.
    #[serde(default = "default_free_daily_limit")]
    pub free_daily_limit: u32,

    /// How long a remote license verdict stays trusted.
    #[serde(default = "default_license_ttl_hours")]
    pub license_ttl_hours: u64,

    /// Remote license validation endpoint.
    #[serde(default = "default_validate_url")]
    pub validate_url: String,

    #[serde(skip)]
    pub license_key: Option<String>,
}

fn default_free_daily_limit() -> u32 {
    10
}

fn default_license_ttl_hours() -> u64 {
    24
}

fn default_validate_url() -> String {
    "https://api.flipscan.dev/validate-license".into()
}

impl Default for EntitlementConfig {
    fn default() -> Self {
        Self {
            free_daily_limit: default_free_daily_limit(),
            license_ttl_hours: default_license_ttl_hours(),
            validate_url: default_validate_url(),
            license_key: None,
        }
    }
}

/// Watch-mode debounce settings.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchConfig {
    /// Delay between a query change and the scheduled appraisal run.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    1000
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let mut config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;

        // Load license key from environment variable (never from config file)
        config.entitlement.license_key = std::env::var("FLIPSCAN_LICENSE_KEY").ok();

        config.validate()?;

        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    ///
    /// Lets the CLI run without a config file while still honoring one
    /// when present.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            let mut config = Self::default();
            config.entitlement.license_key = std::env::var("FLIPSCAN_LICENSE_KEY").ok();
            Ok(config)
        }
    }

    fn validate(&self) -> Result<()> {
        if self.network.search_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "search_url",
            }
            .into());
        }
        if self.network.site_url.is_empty() {
            return Err(ConfigError::MissingField { field: "site_url" }.into());
        }
        if !(0.0..=1.0).contains(&self.matcher.required_token_ratio) {
            return Err(ConfigError::InvalidValue {
                field: "required_token_ratio",
                reason: format!("{} is not in [0, 1]", self.matcher.required_token_ratio),
            }
            .into());
        }
        if !(0.0..=1.0).contains(&self.matcher.jaccard_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "jaccard_threshold",
                reason: format!("{} is not in [0, 1]", self.matcher.jaccard_threshold),
            }
            .into());
        }
        if self.score.ratio_span <= rust_decimal::Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "ratio_span",
                reason: format!("{} must be positive", self.score.ratio_span),
            }
            .into());
        }
        Ok(())
    }

    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            logging: LoggingConfig::default(),
            matcher: MatcherConfig::default(),
            filter: FilterConfig::default(),
            score: ScoreConfig::default(),
            entitlement: EntitlementConfig::default(),
            watch: WatchConfig::default(),
        }
    }
}
