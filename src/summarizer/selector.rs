//! Top-k sentence selection for extractive summarization
//!
//! Picks the highest-scoring sentences and restores reading order. Ties go
//! to the earlier sentence, so selection is deterministic and the top-k set
//! only ever grows as k grows.

use crate::pipeline::artifacts::{ScoreVector, Summary};
use crate::types::Document;

/// Top-k sentence selector
#[derive(Debug, Clone, Copy)]
pub struct SentenceSelector {
    num_sentences: usize,
}

impl Default for SentenceSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceSelector {
    /// Create a new selector with the default sentence count (10)
    pub fn new() -> Self {
        Self { num_sentences: 10 }
    }

    /// Set number of sentences to select
    pub fn with_num_sentences(mut self, n: usize) -> Self {
        self.num_sentences = n;
        self
    }

    /// Requested count clamped to `[1, total]`; zero only when `total` is zero
    pub fn effective_count(&self, total: usize) -> usize {
        self.num_sentences.max(1).min(total)
    }

    /// Indices of the selected sentences, ascending
    pub fn select(&self, scores: &ScoreVector) -> Vec<usize> {
        let k = self.effective_count(scores.len());
        let mut selected: Vec<usize> = scores.ranked().into_iter().take(k).collect();
        selected.sort_unstable();
        selected
    }

    /// Select sentences from `document` and materialize their display strings
    pub fn assemble(&self, document: &Document, scores: &ScoreVector) -> Summary {
        debug_assert_eq!(document.len(), scores.len());

        let indices: Vec<usize> = self
            .select(scores)
            .into_iter()
            .filter(|&i| i < document.len())
            .collect();
        let sentences = indices
            .iter()
            .filter_map(|&i| document.sentence(i))
            .map(|s| document.display(s).into_owned())
            .collect();
        let selected_scores = indices.iter().map(|&i| scores.get(i)).collect();

        Summary::new(
            indices,
            sentences,
            selected_scores,
            scores.mode(),
            scores.converged(),
        )
    }
}

/// Select the `k` best sentences of `document`, in reading order
pub fn assemble(document: &Document, scores: &ScoreVector, k: usize) -> Summary {
    SentenceSelector::new()
        .with_num_sentences(k)
        .assemble(document, scores)
}
