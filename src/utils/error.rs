//! Error types for the retrieval and normalization stages
//!
//! Both kinds are recovered locally by the pipeline: a failed facet becomes
//! an empty table, a malformed field becomes a missing value.

use thiserror::Error;

/// Errors that can occur while retrieving a facet from the Open API
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP transport error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status returned by the API
    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Response body could not be decoded as JSON
    #[error("Decoding error: {0}")]
    Decode(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Request rejected before it was sent (e.g. empty keyword)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl FetchError {
    /// HTTP status code, when the failure carries one
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Classify a transport error, separating timeouts from other failures
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

/// Errors that can occur while normalizing a raw payload
#[derive(Error, Debug)]
pub enum ParseError {
    /// Payload does not match the expected schema for a facet
    #[error("Unexpected {facet} payload shape: {message}")]
    Shape {
        facet: &'static str,
        message: String,
    },

    /// Date field could not be parsed
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

impl ParseError {
    pub(crate) fn shape(facet: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Shape {
            facet,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        let err = FetchError::Status {
            status: 401,
            body: "unauthorized".to_string(),
        };
        assert_eq!(err.status(), Some(401));
        assert_eq!(FetchError::Timeout.status(), None);
    }

    #[test]
    fn test_shape_error_message() {
        let err = ParseError::shape("trend", "missing field `results`");
        assert_eq!(
            err.to_string(),
            "Unexpected trend payload shape: missing field `results`"
        );
    }
}
