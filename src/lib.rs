//! shoplens - Naver shopping keyword intelligence
//!
//! Pulls three views of a product keyword from the Naver Open API (the
//! DataLab shopping click trend, blog posts and shopping listings), turns them
//! into typed tables and derives comparable analytics for two keywords side
//! by side.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`source`] - Open API client behind the [`source::SourceClient`] trait
//! - [`normalizer`] - Raw JSON payloads to typed tables
//! - [`analytics`] - TF-IDF term ranking, descriptive statistics and listing aggregates
//! - [`pipeline`] - Per-keyword orchestration and two-keyword comparison
//! - [`models`] - Core data structures and types
//! - [`config`] - Configuration management and settings
//! - [`logging`] - Optional tracing subscriber setup
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use shoplens::config::Config;
//! use shoplens::pipeline::KeywordAnalyzer;
//! use shoplens::source::{Credentials, NaverClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let credentials = Credentials::new("client-id", "client-secret");
//!     let client = NaverClient::with_config(credentials, &config.api)?;
//!
//!     let analyzer = KeywordAnalyzer::with_config(client, config.analysis);
//!     let record = analyzer.analyze("오메가3").await;
//!     println!("{} trend points", record.trend().len());
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod source;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{AnalysisConfig, Config};
    pub use crate::error::{Error, ErrorCategory, LensErrorTrait};
    pub use crate::models::{
        Aggregates, DateRange, Facet, FacetOutcome, KeywordComparison, KeywordRecord, Listing,
        RankedTerm, TextItem, TrendSeries,
    };
    pub use crate::pipeline::KeywordAnalyzer;
    pub use crate::source::{Credentials, NaverClient, SourceClient};
}

// Direct re-exports for convenience
pub use models::{KeywordComparison, KeywordRecord};
pub use pipeline::KeywordAnalyzer;
