//! Unified error handling for the shoplens crate
//!
//! This module provides a unified error type that consolidates the
//! domain-specific errors into a single `Error` enum, while keeping the
//! detailed errors usable on their own.
//!
//! # Architecture
//!
//! - [`LensErrorTrait`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! The analysis pipeline itself never returns these to its caller: facet
//! failures are absorbed into empty tables and logged with their category.
//! They surface only from direct use of the source client or normalizer.

use thiserror::Error;

pub use crate::utils::error::{FetchError, ParseError};

/// Common trait for all shoplens error types
pub trait LensErrorTrait: std::error::Error {
    /// Check if this error is transient (a later attempt may succeed)
    fn is_recoverable(&self) -> bool;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (HTTP, timeout, status)
    Network,
    /// Parsing and schema validation errors
    Parsing,
    /// Invalid client setup or request
    Config,
}

impl ErrorCategory {
    /// Short label for log fields
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Parsing => "parsing",
            Self::Config => "config",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl LensErrorTrait for FetchError {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Timeout | Self::Http(_) => true,
            Self::Status { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            Self::Decode(_) | Self::InvalidUrl(_) | Self::InvalidRequest(_) => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Decode(_) => ErrorCategory::Parsing,
            Self::InvalidUrl(_) | Self::InvalidRequest(_) => ErrorCategory::Config,
            _ => ErrorCategory::Network,
        }
    }
}

impl LensErrorTrait for ParseError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Parsing
    }
}

/// Unified error type for the shoplens crate
#[derive(Error, Debug)]
pub enum Error {
    /// Retrieval errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Normalization errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

impl LensErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_recoverable(),
            Self::Parse(e) => e.is_recoverable(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Fetch(e) => e.category(),
            Self::Parse(e) => e.category(),
        }
    }
}
