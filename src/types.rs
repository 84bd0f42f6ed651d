//! Core types for rapid_summary
//!
//! This module defines the document model shared by every pipeline stage:
//! the interned vocabulary, sentences as spans into an owned buffer, and the
//! request configuration.

use crate::errors::{Result, SummaryError};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::ops::Range;
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// String Interning
// ============================================================================

/// A pool for interning normalized terms.
///
/// Each distinct term is stored once per document; sentences refer to terms by
/// their `u32` ID, which keeps similarity computation allocation-free.
#[derive(Debug, Default, Clone)]
pub struct StringPool {
    string_to_id: FxHashMap<Arc<str>, u32>,
    id_to_string: Vec<Arc<str>>,
}

impl StringPool {
    /// Create a new empty string pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a string pool with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            string_to_id: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            id_to_string: Vec::with_capacity(capacity),
        }
    }

    /// Intern a string, returning its ID
    pub fn intern(&mut self, s: &str) -> u32 {
        if let Some(&id) = self.string_to_id.get(s) {
            return id;
        }

        let id = self.id_to_string.len() as u32;
        let arc: Arc<str> = s.into();
        self.string_to_id.insert(arc.clone(), id);
        self.id_to_string.push(arc);
        id
    }

    /// Get a string by its ID
    pub fn get(&self, id: u32) -> Option<&str> {
        self.id_to_string.get(id as usize).map(|s| s.as_ref())
    }

    /// Look up the ID of an already interned string
    pub fn id_of(&self, s: &str) -> Option<u32> {
        self.string_to_id.get(s).copied()
    }

    /// Get the number of unique strings in the pool
    pub fn len(&self) -> usize {
        self.id_to_string.len()
    }

    /// Check if the pool is empty
    pub fn is_empty(&self) -> bool {
        self.id_to_string.is_empty()
    }
}

// ============================================================================
// Sentence
// ============================================================================

/// A sentence of a [`Document`].
///
/// The sentence does not own its text: `span` is a byte range into the
/// document's buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Position in the document (0-based, unique)
    pub index: usize,
    /// Byte range of the sentence within the document text
    pub span: Range<usize>,
    /// Normalized content terms (lowercased, stopwords removed), as vocabulary IDs
    pub terms: Vec<u32>,
    /// Number of word tokens before stopword removal
    pub word_count: usize,
}

impl Sentence {
    /// Create a new sentence
    pub fn new(index: usize, span: Range<usize>, terms: Vec<u32>, word_count: usize) -> Self {
        Self {
            index,
            span,
            terms,
            word_count,
        }
    }

    /// Whether this sentence has more than `min_tokens - 1` word tokens
    pub fn is_usable(&self, min_tokens: usize) -> bool {
        self.word_count >= min_tokens
    }
}

// ============================================================================
// Document
// ============================================================================

/// An immutable segmented document.
///
/// Built once per request by
/// [`SentenceSegmenter::segment`](crate::nlp::segmenter::SentenceSegmenter::segment)
/// and discarded once the summary is produced.
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    sentences: Vec<Sentence>,
    vocabulary: StringPool,
}

impl Document {
    /// Assemble a document from its parts.
    ///
    /// Sentence indices must match their position and spans must lie on
    /// character boundaries of `text`.
    pub(crate) fn from_parts(text: String, sentences: Vec<Sentence>, vocabulary: StringPool) -> Self {
        debug_assert!(sentences.iter().enumerate().all(|(i, s)| s.index == i));
        debug_assert!(sentences
            .iter()
            .all(|s| text.is_char_boundary(s.span.start) && text.is_char_boundary(s.span.end)));
        Self {
            text,
            sentences,
            vocabulary,
        }
    }

    /// The full source text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// All sentences in document order
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Get a sentence by index
    pub fn sentence(&self, index: usize) -> Option<&Sentence> {
        self.sentences.get(index)
    }

    /// Number of sentences
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Check if the document has no sentences
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// The exact source text of a sentence
    pub fn raw(&self, sentence: &Sentence) -> &str {
        &self.text[sentence.span.clone()]
    }

    /// The display form of a sentence: source text with line breaks and
    /// whitespace runs collapsed to single spaces.
    pub fn display(&self, sentence: &Sentence) -> Cow<'_, str> {
        collapse_whitespace(self.raw(sentence))
    }

    /// Resolve a vocabulary ID to its term
    pub fn term(&self, id: u32) -> Option<&str> {
        self.vocabulary.get(id)
    }

    /// Number of distinct content terms in the document
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Count sentences with at least `min_tokens` word tokens
    pub fn usable_sentences(&self, min_tokens: usize) -> usize {
        self.sentences
            .iter()
            .filter(|s| s.is_usable(min_tokens))
            .count()
    }
}

fn collapse_whitespace(s: &str) -> Cow<'_, str> {
    let needs_work = s
        .as_bytes()
        .windows(2)
        .any(|w| w[0].is_ascii_whitespace() && w[1].is_ascii_whitespace())
        || s.chars().any(|c| c.is_whitespace() && c != ' ');
    if !needs_work {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    for (i, word) in s.split_whitespace().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(word);
    }
    Cow::Owned(out)
}

// ============================================================================
// Scoring Mode
// ============================================================================

/// Sentence scoring strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// LexRank-style centrality over the sentence similarity graph
    #[default]
    GraphCentrality,
    /// Lightweight term-frequency scoring with optional position bias
    Frequency,
}

impl ScoringMode {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "frequency" | "freq" | "textrank_lite" | "lite" => ScoringMode::Frequency,
            _ => ScoringMode::GraphCentrality,
        }
    }

    /// The name used in JSON and log output
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringMode::GraphCentrality => "graph_centrality",
            ScoringMode::Frequency => "frequency",
        }
    }
}

impl std::str::FromStr for ScoringMode {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Ok(ScoringMode::parse(value))
    }
}

impl std::fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for one summarization request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Number of sentences to select
    pub sentence_count: usize,
    /// Damping factor for the centrality iteration
    pub damping_factor: f64,
    /// Stop iterating once the L1 change drops below this value
    pub convergence_tolerance: f64,
    /// Iteration cap for the centrality ranker
    pub max_iterations: usize,
    /// Which scorer to use
    pub scoring_mode: ScoringMode,
    /// Edges with similarity below this value are dropped
    pub similarity_threshold: f64,
    /// Favor earlier sentences in frequency mode
    pub position_weighting: bool,
    /// Minimum word count for a sentence to count as usable
    pub min_sentence_tokens: usize,
    /// Language code for stopwords
    pub language: String,
    /// Additional stopwords (extends the built-in list)
    pub extra_stopwords: Vec<String>,
    /// Wall-clock budget for the centrality ranker in milliseconds
    pub time_budget_ms: Option<u64>,
    /// Marker placed before each sentence when formatting
    pub bullet: String,
    /// Separator placed between formatted sentences
    pub separator: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            sentence_count: 10,
            damping_factor: 0.85,
            convergence_tolerance: 1e-4,
            max_iterations: 100,
            scoring_mode: ScoringMode::GraphCentrality,
            similarity_threshold: 0.0,
            position_weighting: true,
            min_sentence_tokens: 4,
            language: "en".to_string(),
            extra_stopwords: Vec::new(),
            time_budget_ms: None,
            bullet: "• ".to_string(),
            separator: "\n\n".to_string(),
        }
    }
}

impl SummaryConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SummaryConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.sentence_count == 0 {
            return Err(SummaryError::invalid_config("sentence_count must be > 0"));
        }

        if !(self.damping_factor > 0.0 && self.damping_factor < 1.0) {
            return Err(SummaryError::invalid_config(format!(
                "damping_factor must be in (0, 1), got {}",
                self.damping_factor
            )));
        }

        if !self.convergence_tolerance.is_finite() || self.convergence_tolerance <= 0.0 {
            return Err(SummaryError::invalid_config(
                "convergence_tolerance must be a positive number",
            ));
        }

        if self.max_iterations == 0 {
            return Err(SummaryError::invalid_config("max_iterations must be > 0"));
        }

        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(SummaryError::invalid_config(format!(
                "similarity_threshold must be in [0, 1], got {}",
                self.similarity_threshold
            )));
        }

        Ok(())
    }

    /// The ranker time budget, if any
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }

    /// Builder method: set the number of sentences to select
    pub fn with_sentence_count(mut self, sentence_count: usize) -> Self {
        self.sentence_count = sentence_count;
        self
    }

    /// Builder method: set damping factor
    pub fn with_damping_factor(mut self, damping_factor: f64) -> Self {
        self.damping_factor = damping_factor;
        self
    }

    /// Builder method: set convergence tolerance
    pub fn with_convergence_tolerance(mut self, tolerance: f64) -> Self {
        self.convergence_tolerance = tolerance;
        self
    }

    /// Builder method: set max iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Builder method: set scoring mode
    pub fn with_scoring_mode(mut self, mode: ScoringMode) -> Self {
        self.scoring_mode = mode;
        self
    }

    /// Builder method: set similarity threshold
    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Builder method: toggle position weighting (frequency mode)
    pub fn with_position_weighting(mut self, enabled: bool) -> Self {
        self.position_weighting = enabled;
        self
    }

    /// Builder method: set the usable-sentence word minimum
    pub fn with_min_sentence_tokens(mut self, min_tokens: usize) -> Self {
        self.min_sentence_tokens = min_tokens;
        self
    }

    /// Builder method: set language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Builder method: add extra stopwords
    pub fn with_extra_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_stopwords.extend(words.into_iter().map(Into::into));
        self
    }

    /// Builder method: set the ranker wall-clock budget
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget_ms = Some(u64::try_from(budget.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Builder method: set output delimiters
    pub fn with_delimiters(mut self, bullet: impl Into<String>, separator: impl Into<String>) -> Self {
        self.bullet = bullet.into();
        self.separator = separator.into();
        self
    }
}
