//! Extraction adapter boundary
//!
//! OCR engines and PDF text-layer readers live outside this crate. They plug
//! in through [`TextExtractor`] and hand back per-page text, which is
//! normalized here into plain text the segmenter can work with.

use crate::errors::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

static LINE_BREAK_HYPHEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\p{L})-[ \t]*\n[ \t]*(\p{Ll})").expect("Line-break hyphen regex pattern is valid and should compile")
});
static HORIZONTAL_WHITESPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[ \t\u{00A0}\u{2000}-\u{200A}\u{202F}\u{3000}]+")
        .expect("Horizontal whitespace regex pattern is valid and should compile")
});
static SPACE_AROUND_NEWLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" ?\n ?").expect("Newline padding regex pattern is valid and should compile"));

/// Where extracted text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Embedded PDF text layer
    Pdf,
    /// OCR over a scanned image
    Image,
    /// Text that needed no extraction
    PlainText,
}

/// Raw per-page output of an extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedText {
    /// Text of each page in order; a page without text is an empty string
    pub pages: Vec<String>,
    pub source: SourceKind,
}

impl ExtractedText {
    pub fn new(pages: Vec<String>, source: SourceKind) -> Self {
        Self { pages, source }
    }

    /// A single-page result
    pub fn single(text: impl Into<String>, source: SourceKind) -> Self {
        Self::new(vec![text.into()], source)
    }

    /// Pages that yielded any non-whitespace text
    pub fn non_empty_pages(&self) -> usize {
        self.pages.iter().filter(|p| !p.trim().is_empty()).count()
    }

    /// Join the pages and normalize extraction noise.
    ///
    /// Page boundaries become blank lines, so a sentence never spans pages.
    pub fn into_plain_text(self) -> String {
        let joined = self
            .pages
            .iter()
            .map(|p| p.as_str())
            .filter(|p| !p.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        normalize_extracted_text(&joined)
    }
}

/// Clean up OCR/PDF text: unify line endings, rejoin words hyphenated across
/// lines, collapse horizontal whitespace, and strip control noise.
///
/// Newlines are preserved; the segmenter decides which of them matter.
pub fn normalize_extracted_text(text: &str) -> String {
    let text = text
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\u{000C}', "\n\n")
        .replace(['\0', '\u{FEFF}'], "");

    let text = LINE_BREAK_HYPHEN.replace_all(&text, "$1$2");
    let text = HORIZONTAL_WHITESPACE.replace_all(&text, " ");
    let text = SPACE_AROUND_NEWLINE.replace_all(&text, "\n");

    text.trim().to_string()
}

/// Converts document bytes into text.
///
/// Implementations are built once at startup (model loading and the like)
/// and shared read-only across requests, typically behind an `Arc`.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText>;
}

impl<T: TextExtractor + ?Sized> TextExtractor for Arc<T> {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText> {
        (**self).extract(bytes)
    }
}

impl<T: TextExtractor + ?Sized> TextExtractor for Box<T> {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText> {
        (**self).extract(bytes)
    }
}

/// Extractor for input that is already text: lossy UTF-8 decoding
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText> {
        let text = String::from_utf8_lossy(bytes).into_owned();
        Ok(ExtractedText::single(text, SourceKind::PlainText))
    }
}
