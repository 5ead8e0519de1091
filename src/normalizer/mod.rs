//! Conversion of raw API payloads into typed tables
//!
//! Each facet has an explicit schema (see [`schema`]). A payload that does
//! not match it fails with [`ParseError::Shape`], which the pipeline turns
//! into an empty facet. Within a valid payload:
//!
//! - a trend row with an unparsable period or ratio is dropped
//! - an absent text field becomes an empty string
//! - an unparsable or negative price becomes `None`, never zero
//!
//! All functions are pure, so normalizing the same payload twice yields
//! identical tables.

pub mod sanitize;
pub mod schema;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::{Listing, TextItem, TrendPoint, TrendSeries, API_DATE_FORMAT};
use crate::utils::error::ParseError;
use sanitize::clean_text;
use schema::{BlogResponse, Scalar, ShopResponse, TrendResponse, TrendRow};

/// Normalize a DataLab trend payload
///
/// Only the first entry of `results` is used, since one keyword is
/// requested per call.
pub fn normalize_trend(raw: &Value) -> Result<TrendSeries, ParseError> {
    let response: TrendResponse = deserialize_facet(raw, "trend")?;

    let Some(result) = response.results.into_iter().next() else {
        return Ok(TrendSeries::empty());
    };

    let total = result.data.len();
    let points: Vec<TrendPoint> = result.data.iter().filter_map(parse_trend_row).collect();

    if points.len() < total {
        tracing::debug!(dropped = total - points.len(), total, "Dropped malformed trend rows");
    }

    Ok(TrendSeries::from_points(points))
}

fn parse_trend_row(row: &TrendRow) -> Option<TrendPoint> {
    let period = row.period.as_ref().and_then(Scalar::as_text)?;
    let period = parse_period(&period).ok()?;
    let ratio = row.ratio.as_ref().and_then(Scalar::as_number)?;
    Some(TrendPoint { period, ratio })
}

/// Parse a `YYYY-MM-DD` period
pub fn parse_period(text: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(text.trim(), API_DATE_FORMAT)
        .map_err(|_| ParseError::InvalidDate(text.to_string()))
}

/// Normalize a blog search payload
pub fn normalize_corpus(raw: &Value) -> Result<Vec<TextItem>, ParseError> {
    let response: BlogResponse = deserialize_facet(raw, "corpus")?;

    Ok(response
        .items
        .iter()
        .map(|item| TextItem {
            title: text_field(item.title.as_ref()),
            description: text_field(item.description.as_ref()),
        })
        .collect())
}

/// Normalize a shopping search payload
pub fn normalize_listings(raw: &Value) -> Result<Vec<Listing>, ParseError> {
    let response: ShopResponse = deserialize_facet(raw, "listings")?;

    let listings: Vec<Listing> = response
        .items
        .iter()
        .map(|item| Listing {
            title: text_field(item.title.as_ref()),
            low_price: item.lprice.as_ref().and_then(price_field),
            brand: Some(text_field(item.brand.as_ref())).filter(|b| !b.is_empty()),
            mall_name: text_field(item.mall_name.as_ref()),
        })
        .collect();

    let missing_prices = listings.iter().filter(|l| l.low_price.is_none()).count();
    if missing_prices > 0 {
        tracing::debug!(
            missing_prices,
            total = listings.len(),
            "Listings without a usable price"
        );
    }

    Ok(listings)
}

/// Parse a listing price
///
/// Returns `None` for empty, non-numeric, non-finite or negative input.
///
/// # Examples
///
/// ```
/// use shoplens::normalizer::parse_price;
///
/// assert_eq!(parse_price("12900"), Some(12900.0));
/// assert_eq!(parse_price("bad"), None);
/// assert_eq!(parse_price("-1"), None);
/// ```
pub fn parse_price(text: &str) -> Option<f64> {
    let value = text.trim().parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

fn price_field(scalar: &Scalar) -> Option<f64> {
    match scalar {
        Scalar::Text(s) => parse_price(s),
        other => other.as_number().filter(|v| *v >= 0.0),
    }
}

fn text_field(scalar: Option<&Scalar>) -> String {
    scalar
        .and_then(Scalar::as_text)
        .map(|s| clean_text(&s))
        .unwrap_or_default()
}

fn deserialize_facet<T: DeserializeOwned>(
    raw: &Value,
    facet: &'static str,
) -> Result<T, ParseError> {
    T::deserialize(raw).map_err(|e| ParseError::shape(facet, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_trend_sorts_and_drops_bad_rows() {
        let raw = json!({
            "startDate": "2024-01-01",
            "endDate": "2024-01-04",
            "timeUnit": "date",
            "results": [{
                "title": "오메가3",
                "category": ["50000008"],
                "data": [
                    {"period": "2024-01-03", "ratio": 30.5},
                    {"period": "2024-01-01", "ratio": 10.0},
                    {"period": "not-a-date", "ratio": 99.0},
                    {"period": "2024-01-02", "ratio": "n/a"},
                    {"period": "2024-01-04"}
                ]
            }]
        });

        let series = normalize_trend(&raw).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.ratios(), vec![10.0, 30.5]);
    }

    #[test]
    fn test_normalize_trend_empty_results() {
        let series = normalize_trend(&json!({"results": []})).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_normalize_trend_shape_mismatch() {
        let err = normalize_trend(&json!({"errorMessage": "Authentication failed"})).unwrap_err();
        assert!(matches!(err, ParseError::Shape { facet: "trend", .. }));
    }

    #[test]
    fn test_normalize_corpus_missing_fields_become_empty() {
        let raw = json!({
            "items": [
                {"title": "<b>비타민D</b> 후기", "description": null},
                {"description": "only description"}
            ]
        });

        let corpus = normalize_corpus(&raw).unwrap();
        assert_eq!(corpus[0], TextItem::new("비타민D 후기", ""));
        assert_eq!(corpus[1], TextItem::new("", "only description"));
    }

    #[test]
    fn test_normalize_listings_price_coercion() {
        let raw = json!({
            "items": [
                {"title": "A", "lprice": "1000", "brand": "A", "mallName": "네이버"},
                {"title": "B", "lprice": "bad", "brand": "A", "mallName": "쿠팡"},
                {"title": "C", "lprice": 3000, "brand": "", "mallName": "쿠팡"},
                {"title": "D", "lprice": "-5", "mallName": "11번가"}
            ]
        });

        let listings = normalize_listings(&raw).unwrap();
        assert_eq!(listings[0].low_price, Some(1000.0));
        assert_eq!(listings[1].low_price, None);
        assert_eq!(listings[2].low_price, Some(3000.0));
        assert_eq!(listings[2].brand, None);
        assert_eq!(listings[3].low_price, None);
        assert_eq!(listings[3].brand, None);
    }

    #[test]
    fn test_normalize_listings_rejects_non_array_items() {
        let err = normalize_listings(&json!({"items": "oops"})).unwrap_err();
        assert!(matches!(err, ParseError::Shape { facet: "listings", .. }));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let raw = json!({
            "items": [{"title": "<b>x</b>", "lprice": "12", "brand": "b", "mallName": "m"}]
        });
        assert_eq!(
            normalize_listings(&raw).unwrap(),
            normalize_listings(&raw).unwrap()
        );
    }

    #[test]
    fn test_parse_period() {
        assert!(parse_period("2024-02-29").is_ok());
        assert!(matches!(
            parse_period("2023-02-29"),
            Err(ParseError::InvalidDate(_))
        ));
    }
}
