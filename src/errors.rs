//! Error types for rapid_summary
//!
//! Segmentation and configuration problems abort a request and surface here as
//! typed values. Ranking non-convergence is absorbed by the ranker and never
//! becomes an error.

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SummaryError>;

/// Errors produced by the summarization pipeline
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The extracted text is empty or whitespace-only
    #[error("input text is empty")]
    EmptyInput,

    /// Fewer than two usable sentences survived segmentation.
    ///
    /// Carries the raw text so the caller can display it unsummarized.
    #[error("insufficient content to summarize: {usable} usable sentence(s), at least 2 required")]
    InsufficientContent { usable: usize, text: String },

    /// A configuration value is out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The external extraction adapter failed
    #[error("text extraction failed: {message}")]
    Extraction {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl SummaryError {
    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        SummaryError::InvalidConfig(message.into())
    }

    /// Create an extraction error without an underlying source
    pub fn extraction(message: impl Into<String>) -> Self {
        SummaryError::Extraction {
            message: message.into(),
            source: None,
        }
    }

    /// Create an extraction error wrapping the adapter's own error
    pub fn extraction_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        SummaryError::Extraction {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether the caller can still show something useful (the raw text).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SummaryError::InsufficientContent { .. })
    }

    /// The raw text attached to an `InsufficientContent` error.
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            SummaryError::InsufficientContent { text, .. } => Some(text),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SummaryError {
    fn from(err: serde_json::Error) -> Self {
        SummaryError::InvalidConfig(format!("malformed JSON: {}", err))
    }
}
