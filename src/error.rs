//! Error types for the web analyzer.
//!
//! This module provides structured error handling with:
//! - `AppError`: the four terminal failure kinds of an analysis request
//! - `Result<T>`: Type alias for Results using AppError

use thiserror::Error;

// ============================================================================
// DOMAIN ERROR TYPE
// ============================================================================

/// Failure kinds surfaced to the caller. None of them is retried internally.
#[derive(Debug, Error)]
pub enum AppError {
    /// URL fails parsing after normalization
    #[error("{0}")]
    InvalidInput(String),

    /// Required credential or endpoint absent for the selected backend
    #[error("{0}")]
    MissingConfiguration(String),

    /// Non-2xx or transport failure from the analysis API
    #[error("PageSpeed API Error: {0}")]
    UpstreamError(String),

    /// Response parsed but lacks the `lighthouseResult` node
    #[error("{0}")]
    MalformedResponse(String),

    /// Writing an exported report failed
    #[error("Export error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn missing_configuration(msg: impl Into<String>) -> Self {
        Self::MissingConfiguration(msg.into())
    }

    /// Create an upstream error; an empty detail becomes "Unknown error".
    pub fn upstream(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        if msg.trim().is_empty() {
            Self::UpstreamError("Unknown error".to_string())
        } else {
            Self::UpstreamError(msg)
        }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Stable short name of the error kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::MissingConfiguration(_) => "missing_configuration",
            Self::UpstreamError(_) => "upstream_error",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Io(_) => "io",
            Self::Other(_) => "other",
        }
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_message_keeps_prefix() {
        let err = AppError::upstream("Quota exceeded");
        assert_eq!(err.to_string(), "PageSpeed API Error: Quota exceeded");
        assert_eq!(err.kind(), "upstream_error");
    }

    #[test]
    fn empty_upstream_detail_becomes_unknown() {
        let err = AppError::upstream("  ");
        assert_eq!(err.to_string(), "PageSpeed API Error: Unknown error");
    }

    #[test]
    fn malformed_message_is_passed_through() {
        let err = AppError::malformed("Invalid API response: No lighthouse result");
        assert_eq!(err.to_string(), "Invalid API response: No lighthouse result");
    }
}
