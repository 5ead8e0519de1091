//! Keyword record builder
//!
//! Runs the full analysis for one keyword: the three facets are retrieved
//! concurrently, normalized independently and analyzed into an immutable
//! [`KeywordRecord`]. A facet that fails to load is replaced by an empty
//! table and noted in the record's [`FacetStatus`]; the record itself is
//! always produced.
//!
//! # Example
//!
//! ```no_run
//! use shoplens::pipeline::KeywordAnalyzer;
//! use shoplens::source::{Credentials, NaverClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = NaverClient::new(Credentials::new("id", "secret"))?;
//! let analyzer = KeywordAnalyzer::new(client);
//!
//! let comparison = analyzer.compare("오메가3", "비타민D").await;
//! for record in comparison.records() {
//!     println!("{}: {} listings", record.keyword(), record.listings().len());
//! }
//! # Ok(())
//! # }
//! ```

use serde_json::Value;
use std::sync::Arc;

use crate::analytics::{aggregate_listings, rank_terms};
use crate::config::AnalysisConfig;
use crate::error::{Error, LensErrorTrait};
use crate::models::{
    DateRange, Facet, FacetOutcome, FacetStatus, KeywordComparison, KeywordRecord,
    KeywordRecordParts, TrendSeries,
};
use crate::normalizer::{normalize_corpus, normalize_listings, normalize_trend};
use crate::source::SourceClient;
use crate::utils::error::{FetchError, ParseError};

/// Builds keyword records from a [`SourceClient`]
///
/// The analyzer holds only shared, immutable state, so clones can run
/// pipelines for different keywords at the same time.
pub struct KeywordAnalyzer<C> {
    client: Arc<C>,
    config: AnalysisConfig,
}

impl<C> Clone for KeywordAnalyzer<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            config: self.config.clone(),
        }
    }
}

impl<C: SourceClient> KeywordAnalyzer<C> {
    /// Create an analyzer with the default analysis options
    pub fn new(client: C) -> Self {
        Self::with_config(client, AnalysisConfig::default())
    }

    pub fn with_config(client: C, config: AnalysisConfig) -> Self {
        Self::from_shared(Arc::new(client), config)
    }

    /// Create an analyzer around a client that is already shared
    pub fn from_shared(client: Arc<C>, config: AnalysisConfig) -> Self {
        Self { client, config }
    }

    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze `keyword` within `category_id` over `date_range`
    ///
    /// Never fails: retrieval or normalization errors only empty the facet
    /// they occurred in.
    pub async fn analyze_keyword(
        &self,
        keyword: &str,
        category_id: &str,
        date_range: &DateRange,
    ) -> KeywordRecord {
        let keyword = keyword.trim();
        let limit = self.config.result_limit;

        tracing::info!(
            keyword,
            category_id,
            start = %date_range.start_str(),
            end = %date_range.end_str(),
            "Analyzing keyword"
        );

        let (trend_raw, corpus_raw, listings_raw) = tokio::join!(
            self.client.fetch_trend(keyword, category_id, date_range),
            self.client.fetch_corpus(keyword, limit),
            self.client.fetch_listings(keyword, limit),
        );

        let (trend, trend_outcome) = load_facet(
            keyword,
            Facet::Trend,
            trend_raw,
            normalize_trend,
            TrendSeries::len,
        );
        let (corpus, corpus_outcome) = load_facet(
            keyword,
            Facet::Corpus,
            corpus_raw,
            normalize_corpus,
            Vec::len,
        );
        let (listings, listings_outcome) = load_facet(
            keyword,
            Facet::Listings,
            listings_raw,
            normalize_listings,
            Vec::len,
        );

        let term_ranking = rank_terms(&corpus, self.config.max_vocabulary);
        let listing_aggregates = aggregate_listings(&listings, &trend, &self.config);

        let facet_status = FacetStatus {
            trend: trend_outcome,
            corpus: corpus_outcome,
            listings: listings_outcome,
        };

        tracing::info!(
            keyword,
            trend_points = trend.len(),
            documents = corpus.len(),
            listings = listings.len(),
            terms = term_ranking.len(),
            failed_facets = facet_status.failed().len(),
            "Keyword analysis complete"
        );

        KeywordRecord::new(KeywordRecordParts {
            keyword: keyword.to_string(),
            trend,
            corpus,
            listings,
            term_ranking,
            listing_aggregates,
            facet_status,
        })
    }

    /// Analyze `keyword` with the configured category over the lookback
    /// window ending today
    pub async fn analyze(&self, keyword: &str) -> KeywordRecord {
        let date_range = self.config.current_date_range();
        self.analyze_keyword(keyword, &self.config.category_id, &date_range)
            .await
    }

    /// Analyze two keywords concurrently over the same window
    pub async fn compare(&self, first: &str, second: &str) -> KeywordComparison {
        let date_range = self.config.current_date_range();
        let category_id = self.config.category_id.as_str();

        let (first, second) = tokio::join!(
            self.analyze_keyword(first, category_id, &date_range),
            self.analyze_keyword(second, category_id, &date_range),
        );

        KeywordComparison::new(first, second)
    }
}

/// Normalize a fetched facet, substituting an empty table on any failure
fn load_facet<T: Default>(
    keyword: &str,
    facet: Facet,
    fetched: Result<Value, FetchError>,
    normalize: fn(&Value) -> Result<T, ParseError>,
    rows: fn(&T) -> usize,
) -> (T, FacetOutcome) {
    let loaded = fetched
        .map_err(Error::from)
        .and_then(|raw| normalize(&raw).map_err(Error::from));

    match loaded {
        Ok(table) => {
            let outcome = FacetOutcome::Loaded { rows: rows(&table) };
            (table, outcome)
        }
        Err(e) => {
            tracing::warn!(
                keyword,
                facet = %facet,
                category = %e.category(),
                recoverable = e.is_recoverable(),
                error = %e,
                "Facet unavailable, continuing with empty data"
            );
            (
                T::default(),
                FacetOutcome::Failed {
                    reason: e.to_string(),
                },
            )
        }
    }
}
