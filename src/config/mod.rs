//! Configuration management for shoplens
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files. Credentials are not part of it: the caller
//! hands them to [`crate::source::NaverClient`] directly.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::models::DateRange;

/// Naver shopping category for health foods
pub const DEFAULT_CATEGORY_ID: &str = "50000008";

/// Maximum `display` value accepted by the search endpoints
pub const MAX_RESULT_LIMIT: usize = 100;

/// Longest accepted trend lookback window, in days
pub const MAX_LOOKBACK_DAYS: u32 = 3650;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Analysis pipeline options
    pub analysis: AnalysisConfig,

    /// Open API transport options
    pub api: ApiConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Options consumed by the analysis stages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Shopping category the trend facet is requested for
    pub category_id: String,

    /// Length of the trend lookback window in days
    pub lookback_days: u32,

    /// Number of items requested from the blog and shopping searches
    pub result_limit: usize,

    /// Vocabulary bound for the term ranking
    pub max_vocabulary: usize,

    /// Length of the brand/mall rankings
    pub top_n: usize,

    /// Number of equal-width bins in the price histogram
    pub histogram_bins: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            category_id: DEFAULT_CATEGORY_ID.to_string(),
            lookback_days: 365,
            result_limit: MAX_RESULT_LIMIT,
            max_vocabulary: 20,
            top_n: 10,
            histogram_bins: 20,
        }
    }
}

impl AnalysisConfig {
    /// Lookback window ending on `today`
    #[must_use]
    pub fn date_range(&self, today: NaiveDate) -> DateRange {
        DateRange::lookback(today, self.lookback_days)
    }

    /// Lookback window ending on the local current date
    #[must_use]
    pub fn current_date_range(&self) -> DateRange {
        self.date_range(Local::now().date_naive())
    }

    /// Validate option values
    pub fn validate(&self) -> Result<()> {
        if self.category_id.trim().is_empty() {
            anyhow::bail!("category_id must not be empty");
        }

        if self.lookback_days == 0 || self.lookback_days > MAX_LOOKBACK_DAYS {
            anyhow::bail!("lookback_days must be between 1 and {MAX_LOOKBACK_DAYS}");
        }

        if self.result_limit == 0 || self.result_limit > MAX_RESULT_LIMIT {
            anyhow::bail!("result_limit must be between 1 and {MAX_RESULT_LIMIT}");
        }

        if self.max_vocabulary == 0 {
            anyhow::bail!("max_vocabulary must be greater than 0");
        }

        if self.top_n == 0 {
            anyhow::bail!("top_n must be greater than 0");
        }

        if self.histogram_bins == 0 {
            anyhow::bail!("histogram_bins must be greater than 0");
        }

        Ok(())
    }
}

/// Open API transport configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the Naver Open API
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User agent string
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("https://openapi.naver.com"),
            timeout_secs: 30,
            user_agent: format!("shoplens/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = AnalysisConfig::default();

        let analysis = AnalysisConfig {
            category_id: std::env::var("SHOPLENS_CATEGORY_ID")
                .unwrap_or_else(|_| defaults.category_id.clone()),
            lookback_days: env_parse("SHOPLENS_LOOKBACK_DAYS").unwrap_or(defaults.lookback_days),
            result_limit: env_parse("SHOPLENS_RESULT_LIMIT").unwrap_or(defaults.result_limit),
            max_vocabulary: env_parse("SHOPLENS_MAX_VOCABULARY")
                .unwrap_or(defaults.max_vocabulary),
            top_n: env_parse("SHOPLENS_TOP_N").unwrap_or(defaults.top_n),
            histogram_bins: env_parse("SHOPLENS_HISTOGRAM_BINS")
                .unwrap_or(defaults.histogram_bins),
        };

        let api_defaults = ApiConfig::default();
        let api = ApiConfig {
            base_url: std::env::var("SHOPLENS_API_BASE_URL").unwrap_or(api_defaults.base_url),
            timeout_secs: env_parse("SHOPLENS_REQUEST_TIMEOUT")
                .unwrap_or(api_defaults.timeout_secs),
            user_agent: std::env::var("SHOPLENS_USER_AGENT").unwrap_or(api_defaults.user_agent),
        };

        let logging = LoggingConfig {
            level: std::env::var("SHOPLENS_LOG_LEVEL").unwrap_or_else(|_| String::from("info")),
            format: std::env::var("SHOPLENS_LOG_FORMAT").unwrap_or_else(|_| String::from("text")),
        };

        Ok(Self {
            analysis,
            api,
            logging,
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.analysis.validate()?;

        url::Url::parse(&self.api.base_url)
            .with_context(|| format!("Invalid API base URL: {}", self.api.base_url))?;

        if self.api.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than 0");
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            anyhow::bail!("log format must be 'text' or 'json'");
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}
