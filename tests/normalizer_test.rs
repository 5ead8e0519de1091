//! Tests for payload normalization

mod common;

use serde_json::json;
use shoplens::normalizer::{normalize_corpus, normalize_listings, normalize_trend, parse_price};
use shoplens::utils::error::ParseError;

#[test]
fn test_trend_rows_sorted_and_malformed_dropped() {
    let series = normalize_trend(&common::trend_payload()).unwrap();

    let ratios = series.ratios();
    assert_eq!(ratios, vec![100.0, 82.25, 75.5]);
    assert!(series
        .points()
        .windows(2)
        .all(|w| w[0].period < w[1].period));
}

#[test]
fn test_trend_duplicate_period_keeps_first() {
    let raw = json!({
        "results": [{"data": [
            {"period": "2024-01-01", "ratio": 10.0},
            {"period": "2024-01-01", "ratio": 99.0}
        ]}]
    });

    let series = normalize_trend(&raw).unwrap();
    assert_eq!(series.ratios(), vec![10.0]);
}

#[test]
fn test_trend_empty_results_is_empty_series() {
    let series = normalize_trend(&json!({"results": []})).unwrap();
    assert!(series.is_empty());

    let series = normalize_trend(&json!({"results": [{"title": "x"}]})).unwrap();
    assert!(series.is_empty());
}

#[test]
fn test_trend_missing_results_is_shape_error() {
    let err = normalize_trend(&json!({"errorMessage": "oops"})).unwrap_err();
    assert!(matches!(err, ParseError::Shape { facet: "trend", .. }));
}

#[test]
fn test_corpus_cleans_markup_and_defaults_missing_fields() {
    let raw = json!({
        "items": [
            {"title": "<b>오메가3</b> 후기", "description": "가격 &lt;1만원&gt;"},
            {"title": "only title"},
            {"description": 42}
        ]
    });

    let corpus = normalize_corpus(&raw).unwrap();

    assert_eq!(corpus.len(), 3);
    assert_eq!(corpus[0].title, "오메가3 후기");
    assert_eq!(corpus[0].description, "가격 <1만원>");
    assert_eq!(corpus[1].description, "");
    assert_eq!(corpus[2].title, "");
    assert_eq!(corpus[2].description, "42");
}

#[test]
fn test_corpus_without_items_is_shape_error() {
    assert!(normalize_corpus(&json!({"total": 0})).is_err());
    assert!(normalize_corpus(&json!([1, 2, 3])).is_err());
}

#[test]
fn test_listings_prices_and_brands() {
    let raw = json!({
        "items": [
            {"title": "a", "lprice": "12900", "brand": "A", "mallName": "쿠팡"},
            {"title": "b", "lprice": "", "brand": "", "mallName": "11번가"},
            {"title": "c", "lprice": 5000, "mallName": "G마켓"},
            {"title": "d", "lprice": "-5", "brand": "  ", "mallName": "옥션"}
        ]
    });

    let listings = normalize_listings(&raw).unwrap();

    assert_eq!(listings[0].low_price, Some(12900.0));
    assert_eq!(listings[0].brand.as_deref(), Some("A"));
    assert_eq!(listings[1].low_price, None);
    assert_eq!(listings[1].brand, None);
    assert_eq!(listings[2].low_price, Some(5000.0));
    assert_eq!(listings[2].brand, None);
    assert_eq!(listings[3].low_price, None);
    assert_eq!(listings[3].brand, None);
    assert_eq!(listings[3].mall_name, "옥션");
}

#[test]
fn test_unparsable_price_is_missing_not_zero() {
    let listings = normalize_listings(&common::shop_payload()).unwrap();

    assert_eq!(listings[1].low_price, None);
    assert!(listings.iter().all(|l| l.low_price != Some(0.0)));
}

#[test]
fn test_parse_price_variants() {
    assert_eq!(parse_price(" 1000 "), Some(1000.0));
    assert_eq!(parse_price("0"), Some(0.0));
    assert_eq!(parse_price("1,000"), None);
    assert_eq!(parse_price("NaN"), None);
    assert_eq!(parse_price("inf"), None);
    assert_eq!(parse_price(""), None);
}

#[test]
fn test_normalizing_twice_is_identical() {
    let trend = common::trend_payload();
    let blogs = common::blog_payload();
    let shop = common::shop_payload();

    assert_eq!(normalize_trend(&trend).unwrap(), normalize_trend(&trend).unwrap());
    assert_eq!(normalize_corpus(&blogs).unwrap(), normalize_corpus(&blogs).unwrap());
    assert_eq!(normalize_listings(&shop).unwrap(), normalize_listings(&shop).unwrap());
}
