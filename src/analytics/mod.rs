//! Analytics over normalized keyword data
//!
//! - [`tfidf`] ranks the vocabulary of a text corpus
//! - [`stats`] summarizes numeric samples
//! - [`listings`] groups shopping listings by brand and mall

pub mod listings;
pub mod stats;
pub mod tfidf;

pub use listings::{
    brand_mean_price, brand_price_spread, mall_counts, price_histogram, price_summary, top_brands,
};
pub use stats::{describe, describe_trend, RATIO_COLUMN};
pub use tfidf::{rank_terms, tokenize, TfidfMatrix, TfidfVectorizer};

use crate::config::AnalysisConfig;
use crate::models::{Aggregates, Listing, TrendSeries};

/// Compute every aggregate of one keyword
///
/// Trend statistics come from `trend`; all other entries from `listings`.
/// Rankings are cut to `config.top_n` and the histogram uses
/// `config.histogram_bins` bins.
#[must_use]
pub fn aggregate_listings(
    listings: &[Listing],
    trend: &TrendSeries,
    config: &AnalysisConfig,
) -> Aggregates {
    let top_brands = top_brands(listings, config.top_n);
    let brand_price_spread = brand_price_spread(listings, &top_brands);

    Aggregates {
        descriptive_stats: describe_trend(trend),
        brand_mean_price: brand_mean_price(listings, config.top_n),
        mall_counts: mall_counts(listings, config.top_n),
        top_brands,
        price_summary: price_summary(listings),
        price_histogram: price_histogram(listings, config.histogram_bins),
        brand_price_spread,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrendPoint;
    use chrono::NaiveDate;

    #[test]
    fn test_aggregate_listings_with_empty_trend() {
        let listings = vec![
            Listing {
                title: "A".to_string(),
                low_price: Some(1000.0),
                brand: Some("A".to_string()),
                mall_name: "m1".to_string(),
            },
            Listing {
                title: "B".to_string(),
                low_price: Some(3000.0),
                brand: Some("B".to_string()),
                mall_name: "m2".to_string(),
            },
        ];

        let aggregates =
            aggregate_listings(&listings, &TrendSeries::empty(), &AnalysisConfig::default());

        assert!(aggregates.descriptive_stats.is_empty());
        assert_eq!(aggregates.brand_mean_price[0], ("B".to_string(), 3000.0));
        assert_eq!(aggregates.top_brands.len(), 2);
        assert_eq!(aggregates.brand_price_spread.len(), 2);
        assert_eq!(aggregates.price_summary.map(|s| s.count), Some(2));
    }

    #[test]
    fn test_aggregate_listings_with_trend_only() {
        let trend = TrendSeries::from_points([TrendPoint {
            period: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            ratio: 50.0,
        }]);

        let aggregates = aggregate_listings(&[], &trend, &AnalysisConfig::default());

        assert_eq!(aggregates.descriptive_stats[RATIO_COLUMN].count, 1);
        assert!(aggregates.brand_mean_price.is_empty());
        assert!(aggregates.mall_counts.is_empty());
        assert!(aggregates.price_histogram.is_empty());
        assert_eq!(aggregates.price_summary, None);
    }
}
