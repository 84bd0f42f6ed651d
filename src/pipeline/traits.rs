//! Stage trait definitions for the pipeline.
//!
//! Stages are statically dispatched; the runner is generic over the
//! preprocessor, and trait objects still work for dynamic composition.

use crate::extraction::normalize_extracted_text;
use crate::types::SummaryConfig;
use std::borrow::Cow;

// ============================================================================
// Preprocessor: optional text normalization (stage 0)
// ============================================================================

/// Optional text normalization before segmentation.
///
/// # Contract
///
/// - **Input**: the raw request text.
/// - **Output**: the text to segment, borrowed when nothing changes.
/// - **Idempotent**: preprocessing twice gives the same result as once.
pub trait Preprocessor: Send + Sync {
    fn preprocess<'a>(&self, text: &'a str, cfg: &SummaryConfig) -> Cow<'a, str>;
}

/// No-op preprocessor, the default for most configurations.
///
/// Passes the text through unchanged, with zero overhead.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPreprocessor;

impl Preprocessor for NoopPreprocessor {
    #[inline]
    fn preprocess<'a>(&self, text: &'a str, _cfg: &SummaryConfig) -> Cow<'a, str> {
        Cow::Borrowed(text)
    }
}

/// Applies extraction cleanup (line endings, hyphenation, whitespace) to
/// text that did not come through a [`TextExtractor`](crate::extraction::TextExtractor).
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractionCleanup;

impl Preprocessor for ExtractionCleanup {
    fn preprocess<'a>(&self, text: &'a str, _cfg: &SummaryConfig) -> Cow<'a, str> {
        let cleaned = normalize_extracted_text(text);
        if cleaned == text {
            Cow::Borrowed(text)
        } else {
            Cow::Owned(cleaned)
        }
    }
}
