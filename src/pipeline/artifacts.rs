//! First-class pipeline artifacts.
//!
//! Typed results flowing between stages: the ranker produces a
//! [`ScoreVector`], the assembler turns it into a [`Summary`], and
//! [`SummaryOutcome`] is what hosts that prefer raw text over an error get
//! back.

use crate::pagerank::PageRankResult;
use crate::types::ScoringMode;
use serde::Serialize;
use std::fmt;

/// Default bullet placed before each summary sentence
pub const DEFAULT_BULLET: &str = "• ";
/// Default separator between summary sentences
pub const DEFAULT_SEPARATOR: &str = "\n\n";

// ============================================================================
// ScoreVector
// ============================================================================

/// One non-negative score per sentence, summing to 1.0.
///
/// Also records how the scores were produced, so a budget fallback from
/// graph centrality to frequency scoring is visible to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreVector {
    scores: Vec<f64>,
    mode: ScoringMode,
    iterations: usize,
    delta: f64,
    converged: bool,
}

impl ScoreVector {
    /// Wrap already-computed scores, normalizing them to sum to 1.0.
    ///
    /// Negative and non-finite entries are clamped to zero first. If nothing
    /// is left, every sentence gets the same share.
    pub fn new(
        mut scores: Vec<f64>,
        mode: ScoringMode,
        iterations: usize,
        delta: f64,
        converged: bool,
    ) -> Self {
        normalize(&mut scores);
        Self {
            scores,
            mode,
            iterations,
            delta,
            converged,
        }
    }

    /// Scores from a centrality run
    pub fn from_pagerank(result: PageRankResult) -> Self {
        Self::new(
            result.scores,
            ScoringMode::GraphCentrality,
            result.iterations,
            result.delta,
            result.converged,
        )
    }

    /// Scores from the single-pass frequency heuristic
    pub fn from_frequencies(scores: Vec<f64>) -> Self {
        Self::new(scores, ScoringMode::Frequency, 0, 0.0, true)
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Score of a sentence, zero if out of range
    pub fn get(&self, index: usize) -> f64 {
        self.scores.get(index).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// The scoring mode that actually produced these scores
    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Final L1 change between the last two iterations
    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Sentence indices from best to worst; equal scores keep document order
    pub fn ranked(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.scores.len()).collect();
        order.sort_by(|&a, &b| self.scores[b].total_cmp(&self.scores[a]).then(a.cmp(&b)));
        order
    }
}

fn normalize(scores: &mut [f64]) {
    if scores.is_empty() {
        return;
    }
    for score in scores.iter_mut() {
        if !score.is_finite() || *score < 0.0 {
            *score = 0.0;
        }
    }

    let sum: f64 = scores.iter().sum();
    if sum > 0.0 {
        for score in scores.iter_mut() {
            *score /= sum;
        }
    } else {
        let uniform = 1.0 / scores.len() as f64;
        scores.fill(uniform);
    }
}

// ============================================================================
// Summary
// ============================================================================

/// The selected sentences, in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    indices: Vec<usize>,
    sentences: Vec<String>,
    scores: Vec<f64>,
    mode: ScoringMode,
    converged: bool,
    #[serde(skip)]
    bullet: String,
    #[serde(skip)]
    separator: String,
}

impl Summary {
    /// Build a summary from parallel vectors of indices, display strings and
    /// scores. Indices must already be ascending.
    pub fn new(
        indices: Vec<usize>,
        sentences: Vec<String>,
        scores: Vec<f64>,
        mode: ScoringMode,
        converged: bool,
    ) -> Self {
        debug_assert_eq!(indices.len(), sentences.len());
        debug_assert_eq!(indices.len(), scores.len());
        debug_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        Self {
            indices,
            sentences,
            scores,
            mode,
            converged,
            bullet: DEFAULT_BULLET.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Set the delimiters used by [`Display`](fmt::Display)
    pub fn with_delimiters(mut self, bullet: impl Into<String>, separator: impl Into<String>) -> Self {
        self.bullet = bullet.into();
        self.separator = separator.into();
        self
    }

    /// Selected sentence indices, ascending
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Selected sentences' display strings, in document order
    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    /// Scores of the selected sentences, parallel to [`Summary::indices`]
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    pub fn converged(&self) -> bool {
        self.converged
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Join the sentences, each prefixed with `bullet`, using `separator`
    pub fn format(&self, bullet: &str, separator: &str) -> String {
        self.sentences
            .iter()
            .map(|s| format!("{bullet}{s}"))
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(&self.bullet, &self.separator))
    }
}

// ============================================================================
// SummaryOutcome
// ============================================================================

/// Either a summary, or the raw text when there was too little to summarize.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryOutcome {
    Summarized(Summary),
    Unsummarized(String),
}

impl SummaryOutcome {
    pub fn is_summarized(&self) -> bool {
        matches!(self, SummaryOutcome::Summarized(_))
    }

    /// The summary, if one was produced
    pub fn summary(&self) -> Option<&Summary> {
        match self {
            SummaryOutcome::Summarized(summary) => Some(summary),
            SummaryOutcome::Unsummarized(_) => None,
        }
    }
}

impl fmt::Display for SummaryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryOutcome::Summarized(summary) => summary.fmt(f),
            SummaryOutcome::Unsummarized(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_vector_normalizes() {
        let scores = ScoreVector::from_frequencies(vec![1.0, 3.0, 0.0]);

        assert_eq!(scores.scores(), &[0.25, 0.75, 0.0]);
        assert_eq!(scores.mode(), ScoringMode::Frequency);
        assert!(scores.converged());
    }

    #[test]
    fn test_all_zero_scores_become_uniform() {
        let scores = ScoreVector::from_frequencies(vec![0.0, 0.0, 0.0, 0.0]);
        assert!(scores.scores().iter().all(|&s| s == 0.25));
    }

    #[test]
    fn test_negative_and_nan_scores_clamped() {
        let scores = ScoreVector::from_frequencies(vec![-1.0, f64::NAN, 2.0]);
        assert_eq!(scores.scores(), &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_ranked_breaks_ties_by_index() {
        let scores = ScoreVector::from_frequencies(vec![0.2, 0.3, 0.3, 0.2]);
        assert_eq!(scores.ranked(), vec![1, 2, 0, 3]);
        assert_eq!(scores.get(10), 0.0);
    }

    #[test]
    fn test_from_pagerank_keeps_diagnostics() {
        let result = PageRankResult::new(vec![0.5, 0.5], 7, 1e-5, true);
        let scores = ScoreVector::from_pagerank(result);

        assert_eq!(scores.mode(), ScoringMode::GraphCentrality);
        assert_eq!(scores.iterations(), 7);
        assert_eq!(scores.delta(), 1e-5);
    }

    fn sample_summary() -> Summary {
        Summary::new(
            vec![0, 4],
            vec!["Alice went to the market.".into(), "Alice arrived home happy.".into()],
            vec![0.3, 0.2],
            ScoringMode::GraphCentrality,
            true,
        )
    }

    #[test]
    fn test_summary_format_and_display() {
        let summary = sample_summary();

        assert_eq!(
            summary.to_string(),
            "• Alice went to the market.\n\n• Alice arrived home happy."
        );
        assert_eq!(
            summary.format("- ", "\n"),
            "- Alice went to the market.\n- Alice arrived home happy."
        );

        let custom = summary.with_delimiters("* ", " | ");
        assert_eq!(
            custom.to_string(),
            "* Alice went to the market. | * Alice arrived home happy."
        );
    }

    #[test]
    fn test_summary_serializes_without_delimiters() {
        let json = serde_json::to_value(sample_summary()).unwrap();

        assert_eq!(json["indices"], serde_json::json!([0, 4]));
        assert_eq!(json["mode"], "graph_centrality");
        assert!(json.get("bullet").is_none());
    }

    #[test]
    fn test_outcome_display() {
        let raw = SummaryOutcome::Unsummarized("Too short".into());
        assert!(!raw.is_summarized());
        assert!(raw.summary().is_none());
        assert_eq!(raw.to_string(), "Too short");

        let summarized = SummaryOutcome::Summarized(sample_summary());
        assert!(summarized.is_summarized());
        assert_eq!(summarized.summary().map(Summary::len), Some(2));
    }
}
