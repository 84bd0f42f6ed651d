//! Term-frequency vectors for sentences
//!
//! Each sentence becomes a sparse vector over the document vocabulary, with
//! raw term counts as weights. Entries are kept sorted by term ID so the dot
//! product is a merge and `cosine(a, b) == cosine(b, a)` holds bit-for-bit.

use crate::types::Sentence;
use rustc_hash::FxHashMap;

/// A sparse term-frequency vector
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    /// Non-zero dimensions: (term ID, count), sorted by term ID
    entries: Vec<(u32, f64)>,
    /// L2 norm of the vector
    norm: f64,
}

impl TermVector {
    /// Create a new empty vector
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a vector from a bag of term IDs
    pub fn from_terms(terms: &[u32]) -> Self {
        let mut counts: FxHashMap<u32, f64> = FxHashMap::default();
        for &term in terms {
            *counts.entry(term).or_insert(0.0) += 1.0;
        }

        let mut entries: Vec<_> = counts.into_iter().collect();
        entries.sort_by_key(|&(term, _)| term);
        let norm = entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();

        Self { entries, norm }
    }

    /// Build the vector for a sentence
    pub fn from_sentence(sentence: &Sentence) -> Self {
        Self::from_terms(&sentence.terms)
    }

    /// Dot product with another vector
    pub fn dot(&self, other: &TermVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut dot = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a, wa) = self.entries[i];
            let (b, wb) = other.entries[j];
            match a.cmp(&b) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    dot += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        dot
    }

    /// Cosine similarity in [0, 1]; zero when either vector is empty
    pub fn cosine_similarity(&self, other: &TermVector) -> f64 {
        if self.norm == 0.0 || other.norm == 0.0 {
            return 0.0;
        }
        (self.dot(other) / (self.norm * other.norm)).clamp(0.0, 1.0)
    }

    /// Weight of a term, zero if absent
    pub fn weight(&self, term: u32) -> f64 {
        self.entries
            .binary_search_by_key(&term, |&(t, _)| t)
            .map_or(0.0, |i| self.entries[i].1)
    }

    /// L2 norm
    pub fn norm(&self) -> f64 {
        self.norm
    }

    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the vector is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
