// Core data structures for shoplens

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Date format used by the DataLab API
pub const API_DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive date window for trend requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Window of `days` days ending on `end`
    ///
    /// The start saturates at the earliest representable date.
    pub fn lookback(end: NaiveDate, days: u32) -> Self {
        Self {
            start: end
                .checked_sub_days(Days::new(u64::from(days)))
                .unwrap_or(NaiveDate::MIN),
            end,
        }
    }

    pub fn start_str(&self) -> String {
        self.start.format(API_DATE_FORMAT).to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format(API_DATE_FORMAT).to_string()
    }
}

/// One observation of the shopping click trend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub period: NaiveDate,
    pub ratio: f64,
}

/// Click-ratio time series, ascending by period with unique periods
///
/// Serialized as a plain list of points; deserializing goes through
/// [`TrendSeries::from_points`], so the ordering holds for any input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<TrendPoint>", into = "Vec<TrendPoint>")]
pub struct TrendSeries {
    points: Vec<TrendPoint>,
}

impl From<Vec<TrendPoint>> for TrendSeries {
    fn from(points: Vec<TrendPoint>) -> Self {
        Self::from_points(points)
    }
}

impl From<TrendSeries> for Vec<TrendPoint> {
    fn from(series: TrendSeries) -> Self {
        series.points
    }
}

impl TrendSeries {
    /// Build a series from points in any order
    ///
    /// Points are sorted by period; when a period repeats, the first
    /// occurrence in the input is kept.
    pub fn from_points(points: impl IntoIterator<Item = TrendPoint>) -> Self {
        let mut by_period: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for point in points {
            by_period.entry(point.period).or_insert(point.ratio);
        }

        Self {
            points: by_period
                .into_iter()
                .map(|(period, ratio)| TrendPoint { period, ratio })
                .collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[TrendPoint] {
        &self.points
    }

    pub fn ratios(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.ratio).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// One blog search hit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextItem {
    pub title: String,
    pub description: String,
}

impl TextItem {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Title and description joined by a single space
    pub fn document(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

/// One shopping search hit
///
/// `None` marks a missing value. A missing price is never reported as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub title: String,
    pub low_price: Option<f64>,
    pub brand: Option<String>,
    pub mall_name: String,
}

/// Aggregate TF-IDF weight of one vocabulary term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTerm {
    pub term: String,
    pub weight: f64,
}

/// Closed-form summary of a numeric column
///
/// Undefined statistics are `None` rather than NaN.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub q50: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Equal-width price bucket; `upper` is exclusive except for the last bin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Price distribution of one brand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandPriceSpread {
    pub brand: String,
    pub stats: DescriptiveStats,
}

/// Derived statistics of one keyword's trend and listings
///
/// Ordered mappings are kept as `(key, value)` vectors in ranking order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregates {
    /// Column name to summary, computed over the trend series
    pub descriptive_stats: BTreeMap<String, DescriptiveStats>,

    /// Mean price per brand, highest first
    pub brand_mean_price: Vec<(String, f64)>,

    /// Listing count per mall, largest first
    pub mall_counts: Vec<(String, usize)>,

    /// Listing count per brand, largest first
    pub top_brands: Vec<(String, usize)>,

    /// Summary of all present listing prices
    pub price_summary: Option<DescriptiveStats>,

    /// Price distribution across all listings
    pub price_histogram: Vec<HistogramBin>,

    /// Price distribution for each brand in `top_brands` order
    pub brand_price_spread: Vec<BrandPriceSpread>,
}

/// Data facets composing a keyword record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facet {
    Trend,
    Corpus,
    Listings,
}

impl Facet {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trend => "trend",
            Self::Corpus => "corpus",
            Self::Listings => "listings",
        }
    }
}

impl std::fmt::Display for Facet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a facet loaded, and why not if it didn't
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacetOutcome {
    Loaded { rows: usize },
    Failed { reason: String },
}

impl FacetOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

/// Per-facet load outcome of one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetStatus {
    pub trend: FacetOutcome,
    pub corpus: FacetOutcome,
    pub listings: FacetOutcome,
}

impl FacetStatus {
    pub fn get(&self, facet: Facet) -> &FacetOutcome {
        match facet {
            Facet::Trend => &self.trend,
            Facet::Corpus => &self.corpus,
            Facet::Listings => &self.listings,
        }
    }

    /// Facets that failed to load
    pub fn failed(&self) -> Vec<Facet> {
        [Facet::Trend, Facet::Corpus, Facet::Listings]
            .into_iter()
            .filter(|facet| !self.get(*facet).is_loaded())
            .collect()
    }

    pub fn all_loaded(&self) -> bool {
        self.failed().is_empty()
    }
}

/// Complete analysis of one keyword
///
/// Built once by the pipeline and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRecord {
    keyword: String,
    trend: TrendSeries,
    corpus: Vec<TextItem>,
    listings: Vec<Listing>,
    term_ranking: Vec<RankedTerm>,
    listing_aggregates: Aggregates,
    facet_status: FacetStatus,
    analyzed_at: DateTime<Utc>,
}

/// Field bundle for [`KeywordRecord::new`]
#[derive(Debug, Clone)]
pub struct KeywordRecordParts {
    pub keyword: String,
    pub trend: TrendSeries,
    pub corpus: Vec<TextItem>,
    pub listings: Vec<Listing>,
    pub term_ranking: Vec<RankedTerm>,
    pub listing_aggregates: Aggregates,
    pub facet_status: FacetStatus,
}

impl KeywordRecord {
    pub fn new(parts: KeywordRecordParts) -> Self {
        Self {
            keyword: parts.keyword,
            trend: parts.trend,
            corpus: parts.corpus,
            listings: parts.listings,
            term_ranking: parts.term_ranking,
            listing_aggregates: parts.listing_aggregates,
            facet_status: parts.facet_status,
            analyzed_at: Utc::now(),
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn trend(&self) -> &TrendSeries {
        &self.trend
    }

    pub fn corpus(&self) -> &[TextItem] {
        &self.corpus
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn term_ranking(&self) -> &[RankedTerm] {
        &self.term_ranking
    }

    pub fn listing_aggregates(&self) -> &Aggregates {
        &self.listing_aggregates
    }

    pub fn facet_status(&self) -> &FacetStatus {
        &self.facet_status
    }

    pub fn analyzed_at(&self) -> DateTime<Utc> {
        self.analyzed_at
    }
}

/// Two independently built records shown side by side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordComparison {
    pub first: KeywordRecord,
    pub second: KeywordRecord,
}

impl KeywordComparison {
    pub fn new(first: KeywordRecord, second: KeywordRecord) -> Self {
        Self { first, second }
    }

    /// Trend comparison is only meaningful when both series have data
    pub fn both_have_trend(&self) -> bool {
        !self.first.trend().is_empty() && !self.second.trend().is_empty()
    }

    pub fn records(&self) -> [&KeywordRecord; 2] {
        [&self.first, &self.second]
    }
}
