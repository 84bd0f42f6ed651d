//! Graph construction and representation
//!
//! Sentences are nodes and cosine similarities are undirected edge weights.
//! The builder collects edges; the CSR form is what the ranker iterates.

pub mod builder;
pub mod csr;

/// The similarity graph handed to the ranker
pub type SimilarityGraph = csr::CsrGraph;
