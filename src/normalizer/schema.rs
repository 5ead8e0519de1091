//! Expected response shapes of the three Open API endpoints
//!
//! Containers (`results`, `data`, `items`) are strict: if they are missing or
//! not arrays of objects, the whole facet is rejected. Leaf fields are
//! lenient [`Scalar`]s so one malformed value only affects its own row.

use serde::Deserialize;
use serde_json::Value;

/// A leaf value as the API sent it
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(f64),
    Other(Value),
}

impl Scalar {
    /// String form of a text or numeric value
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::Number(n) => Some(n.to_string()),
            Self::Other(_) => None,
        }
    }

    /// Finite numeric value, parsing text if needed
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
            Self::Other(_) => None,
        }?;
        value.is_finite().then_some(value)
    }
}

/// `POST /v1/datalab/shopping/categories`
#[derive(Debug, Deserialize)]
pub struct TrendResponse {
    pub results: Vec<TrendResult>,
}

#[derive(Debug, Deserialize)]
pub struct TrendResult {
    #[serde(default)]
    pub data: Vec<TrendRow>,
}

#[derive(Debug, Deserialize)]
pub struct TrendRow {
    #[serde(default)]
    pub period: Option<Scalar>,
    #[serde(default)]
    pub ratio: Option<Scalar>,
}

/// `GET /v1/search/blog.json`
#[derive(Debug, Deserialize)]
pub struct BlogResponse {
    pub items: Vec<BlogItem>,
}

#[derive(Debug, Deserialize)]
pub struct BlogItem {
    #[serde(default)]
    pub title: Option<Scalar>,
    #[serde(default)]
    pub description: Option<Scalar>,
}

/// `GET /v1/search/shop.json`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopResponse {
    pub items: Vec<ShopItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopItem {
    #[serde(default)]
    pub title: Option<Scalar>,
    #[serde(default)]
    pub lprice: Option<Scalar>,
    #[serde(default)]
    pub brand: Option<Scalar>,
    #[serde(default)]
    pub mall_name: Option<Scalar>,
}
