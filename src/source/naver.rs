//! reqwest-backed client for the Naver Open API
//!
//! Authenticates every request with the application's client id/secret pair
//! and performs exactly one attempt per call. A non-success status is
//! returned as [`FetchError::Status`], never raised as a panic or retried.

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE},
    Client, RequestBuilder,
};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::{
    clamp_limit, validate_keyword, SourceClient, BLOG_SEARCH_PATH, SHOP_SEARCH_PATH, TREND_PATH,
};
use crate::config::ApiConfig;
use crate::models::DateRange;
use crate::utils::error::FetchError;
use crate::utils::truncate_text;

const CLIENT_ID_HEADER: &str = "x-naver-client-id";
const CLIENT_SECRET_HEADER: &str = "x-naver-client-secret";

/// Longest error body kept in a [`FetchError::Status`]
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Application credentials issued by the Naver developer console
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

/// DataLab request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TrendRequest<'a> {
    start_date: String,
    end_date: String,
    time_unit: &'static str,
    category: Vec<TrendCategory<'a>>,
}

#[derive(Debug, Serialize)]
struct TrendCategory<'a> {
    name: &'a str,
    param: Vec<&'a str>,
}

/// Naver Open API client
pub struct NaverClient {
    /// HTTP client with credentials installed as default headers
    client: Client,

    /// API root, overridable for mock servers
    base_url: String,
}

impl NaverClient {
    /// Create a client against the public API with default settings
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` for an unparsable base URL,
    /// `FetchError::InvalidRequest` if the credentials are not valid header
    /// values, and `FetchError::Http` if the HTTP client cannot be created
    pub fn new(credentials: Credentials) -> Result<Self, FetchError> {
        Self::with_config(credentials, &ApiConfig::default())
    }

    /// Create a client from transport configuration
    ///
    /// # Errors
    ///
    /// Same as [`NaverClient::new`]
    pub fn with_config(credentials: Credentials, config: &ApiConfig) -> Result<Self, FetchError> {
        Self::build(
            credentials,
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
            &config.user_agent,
        )
    }

    /// Create a client with a custom base URL for testing
    ///
    /// # Errors
    ///
    /// Same as [`NaverClient::new`]
    pub fn with_base_url(base_url: &str, credentials: Credentials) -> Result<Self, FetchError> {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        };
        Self::with_config(credentials, &config)
    }

    /// Create a client with a custom base URL and timeout for testing
    ///
    /// # Errors
    ///
    /// Same as [`NaverClient::new`]
    pub fn with_base_url_and_timeout(
        base_url: &str,
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let user_agent = ApiConfig::default().user_agent;
        Self::build(credentials, base_url, timeout, &user_agent)
    }

    fn build(
        credentials: Credentials,
        base_url: &str,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, FetchError> {
        url::Url::parse(base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .default_headers(Self::build_headers(&credentials)?)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the authentication and content-negotiation headers
    fn build_headers(credentials: &Credentials) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();

        let id = HeaderValue::from_str(&credentials.client_id)
            .map_err(|_| FetchError::InvalidRequest("client id is not a valid header".into()))?;
        let mut secret = HeaderValue::from_str(&credentials.client_secret).map_err(|_| {
            FetchError::InvalidRequest("client secret is not a valid header".into())
        })?;
        secret.set_sensitive(true);

        headers.insert(HeaderName::from_static(CLIENT_ID_HEADER), id);
        headers.insert(HeaderName::from_static(CLIENT_SECRET_HEADER), secret);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7"),
        );

        Ok(headers)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a request once and decode the JSON body
    async fn send_json(
        &self,
        request: RequestBuilder,
        facet: &'static str,
    ) -> Result<Value, FetchError> {
        let response = request.send().await.map_err(FetchError::from_transport)?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(facet, status = status.as_u16(), "API returned non-success status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate_text(&body, MAX_ERROR_BODY_CHARS),
            });
        }

        let body = response.text().await.map_err(FetchError::from_transport)?;
        serde_json::from_str(&body)
            .map_err(|e| FetchError::Decode(format!("{facet} response is not valid JSON: {e}")))
    }

    async fn search(
        &self,
        path: &str,
        keyword: &str,
        limit: usize,
        facet: &'static str,
    ) -> Result<Value, FetchError> {
        let keyword = validate_keyword(keyword)?;
        let display_value = clamp_limit(limit).to_string();

        tracing::debug!(facet, keyword = %keyword, display = %display_value, "Sending search request");

        let request = self
            .client
            .get(self.url(path))
            .query(&[("query", keyword), ("display", display_value.as_str())]);

        self.send_json(request, facet).await
    }
}

#[async_trait]
impl SourceClient for NaverClient {
    async fn fetch_trend(
        &self,
        keyword: &str,
        category_id: &str,
        date_range: &DateRange,
    ) -> Result<Value, FetchError> {
        let keyword = validate_keyword(keyword)?;

        let body = TrendRequest {
            start_date: date_range.start_str(),
            end_date: date_range.end_str(),
            time_unit: "date",
            category: vec![TrendCategory {
                name: keyword,
                param: vec![category_id],
            }],
        };

        tracing::debug!(
            keyword = %keyword,
            category_id = %category_id,
            start = %body.start_date,
            end = %body.end_date,
            "Sending trend request"
        );

        let request = self.client.post(self.url(TREND_PATH)).json(&body);
        self.send_json(request, "trend").await
    }

    async fn fetch_corpus(&self, keyword: &str, limit: usize) -> Result<Value, FetchError> {
        self.search(BLOG_SEARCH_PATH, keyword, limit, "corpus").await
    }

    async fn fetch_listings(&self, keyword: &str, limit: usize) -> Result<Value, FetchError> {
        self.search(SHOP_SEARCH_PATH, keyword, limit, "listings").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("test-id", "test-secret")
    }

    #[test]
    fn test_client_creation() {
        let client = NaverClient::new(credentials());
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url(), "https://openapi.naver.com");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = NaverClient::with_base_url("http://localhost:8080/", credentials()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url(TREND_PATH), "http://localhost:8080/v1/datalab/shopping/categories");
    }

    #[test]
    fn test_build_headers() {
        let headers = NaverClient::build_headers(&credentials()).unwrap();

        assert_eq!(headers.get(CLIENT_ID_HEADER).unwrap(), "test-id");
        assert_eq!(headers.get(CLIENT_SECRET_HEADER).unwrap(), "test-secret");
        assert!(headers.get(CLIENT_SECRET_HEADER).unwrap().is_sensitive());
        assert!(headers.contains_key(ACCEPT));
        assert!(headers.contains_key(ACCEPT_LANGUAGE));
    }

    #[test]
    fn test_invalid_credentials_rejected() {
        let bad = Credentials::new("id\nwith-newline", "secret");
        assert!(matches!(
            NaverClient::new(bad),
            Err(FetchError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(matches!(
            NaverClient::with_base_url("not a url", credentials()),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let printed = format!("{:?}", credentials());
        assert!(printed.contains("test-id"));
        assert!(!printed.contains("test-secret"));
    }

    #[test]
    fn test_trend_request_body_shape() {
        let body = TrendRequest {
            start_date: "2023-07-01".to_string(),
            end_date: "2024-06-30".to_string(),
            time_unit: "date",
            category: vec![TrendCategory {
                name: "오메가3",
                param: vec!["50000008"],
            }],
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["startDate"], "2023-07-01");
        assert_eq!(json["timeUnit"], "date");
        assert_eq!(json["category"][0]["name"], "오메가3");
        assert_eq!(json["category"][0]["param"][0], "50000008");
    }
}
