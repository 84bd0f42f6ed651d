//! Summarization components
//!
//! Term-frequency sentence vectors for the similarity graph, and the
//! top-k sentence selector that assembles the final summary.

pub mod selector;
pub mod term_vector;
