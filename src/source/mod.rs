//! Retrieval of the three data facets from the Naver Open API
//!
//! [`SourceClient`] is the seam between the analysis core and the transport.
//! Implementations return raw JSON payloads; turning them into typed tables
//! is the job of [`crate::normalizer`]. Each call is a single attempt with no
//! retry, cache or pagination.

pub mod naver;

pub use naver::{Credentials, NaverClient};

use async_trait::async_trait;
use serde_json::Value;

use crate::models::DateRange;
use crate::utils::error::FetchError;

/// DataLab shopping category trend endpoint
pub const TREND_PATH: &str = "/v1/datalab/shopping/categories";

/// Blog search endpoint
pub const BLOG_SEARCH_PATH: &str = "/v1/search/blog.json";

/// Shopping search endpoint
pub const SHOP_SEARCH_PATH: &str = "/v1/search/shop.json";

/// Access to the external search/commerce API
#[async_trait]
pub trait SourceClient: Send + Sync {
    /// Daily click-ratio trend of `keyword` within a shopping category
    async fn fetch_trend(
        &self,
        keyword: &str,
        category_id: &str,
        date_range: &DateRange,
    ) -> Result<Value, FetchError>;

    /// Blog posts matching `keyword`, at most `limit`
    async fn fetch_corpus(&self, keyword: &str, limit: usize) -> Result<Value, FetchError>;

    /// Shopping listings matching `keyword`, at most `limit`
    async fn fetch_listings(&self, keyword: &str, limit: usize) -> Result<Value, FetchError>;
}

/// Reject requests the API would refuse anyway
pub(crate) fn validate_keyword(keyword: &str) -> Result<&str, FetchError> {
    let trimmed = keyword.trim();
    if trimmed.is_empty() {
        return Err(FetchError::InvalidRequest(
            "keyword must not be empty".to_string(),
        ));
    }
    Ok(trimmed)
}

/// Clamp a result cap to the search API's accepted `display` range
pub(crate) fn clamp_limit(limit: usize) -> usize {
    limit.clamp(1, crate::config::MAX_RESULT_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_keyword() {
        assert_eq!(validate_keyword("  오메가3 ").unwrap(), "오메가3");
        assert!(matches!(
            validate_keyword("   "),
            Err(FetchError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(0), 1);
        assert_eq!(clamp_limit(50), 50);
        assert_eq!(clamp_limit(1000), 100);
    }
}
