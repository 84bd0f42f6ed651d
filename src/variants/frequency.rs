//! Frequency variant
//!
//! The lightweight, graph-free scoring mode. A sentence scores the sum of the
//! normalized document frequencies of its content terms, optionally boosted
//! for sentences near the start of the document.
//!
//! Position bias: weight = 1 + 1 / (index + 1)
//! so the first sentence counts double and the boost fades with distance.

use crate::pipeline::artifacts::ScoreVector;
use crate::types::{Document, SummaryConfig};

/// Frequency-based sentence scorer
#[derive(Debug, Clone, Copy)]
pub struct FrequencyRank {
    position_weighting: bool,
}

impl Default for FrequencyRank {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyRank {
    /// Create a scorer with position weighting enabled
    pub fn new() -> Self {
        Self {
            position_weighting: true,
        }
    }

    /// Create from a summary configuration
    pub fn with_config(config: &SummaryConfig) -> Self {
        Self {
            position_weighting: config.position_weighting,
        }
    }

    /// Enable or disable the position bias
    pub fn with_position_weighting(mut self, enabled: bool) -> Self {
        self.position_weighting = enabled;
        self
    }

    /// Score every sentence of a document
    pub fn rank(&self, document: &Document) -> ScoreVector {
        let frequencies = self.term_frequencies(document);

        let scores = document
            .sentences()
            .iter()
            .map(|sentence| {
                let content: f64 = sentence
                    .terms
                    .iter()
                    .map(|&t| frequencies.get(t as usize).copied().unwrap_or(0.0))
                    .sum();
                if self.position_weighting {
                    content * position_weight(sentence.index)
                } else {
                    content
                }
            })
            .collect();

        ScoreVector::from_frequencies(scores)
    }

    /// Document-wide term frequencies divided by the most frequent term's
    /// count, indexed by term ID
    fn term_frequencies(&self, document: &Document) -> Vec<f64> {
        let mut counts = vec![0usize; document.vocabulary_size()];
        for sentence in document.sentences() {
            for &term in &sentence.terms {
                if let Some(count) = counts.get_mut(term as usize) {
                    *count += 1;
                }
            }
        }

        let max = counts.iter().copied().max().unwrap_or(0);
        if max == 0 {
            return vec![0.0; counts.len()];
        }
        counts.into_iter().map(|c| c as f64 / max as f64).collect()
    }
}

/// Boost for the sentence at `index`: 2.0 for the first, approaching 1.0
pub fn position_weight(index: usize) -> f64 {
    1.0 + 1.0 / (index as f64 + 1.0)
}

/// Convenience function to score sentences by term frequency
pub fn rank_sentences_frequency(document: &Document, config: &SummaryConfig) -> ScoreVector {
    FrequencyRank::with_config(config).rank(document)
}
