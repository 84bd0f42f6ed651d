//! LexRank variant
//!
//! Sentences are scored by their centrality in the cosine-similarity graph:
//! the similarity matrix is row-normalized into a Markov chain and its
//! stationary distribution (with damping) is the score vector.

use crate::graph::builder::build_similarity_graph;
use crate::graph::csr::CsrGraph;
use crate::pagerank::standard::StandardPageRank;
use crate::pagerank::PageRankResult;
use crate::pipeline::artifacts::ScoreVector;
use crate::types::{Document, SummaryConfig};
use std::time::Instant;

/// LexRank implementation
#[derive(Debug, Clone)]
pub struct LexRank {
    config: SummaryConfig,
}

impl Default for LexRank {
    fn default() -> Self {
        Self::new()
    }
}

impl LexRank {
    /// Create a new LexRank ranker with default config
    pub fn new() -> Self {
        Self {
            config: SummaryConfig::default(),
        }
    }

    /// Create with custom config
    pub fn with_config(config: SummaryConfig) -> Self {
        Self { config }
    }

    /// Build the CSR similarity graph for a document
    pub fn build_graph(&self, document: &Document) -> CsrGraph {
        let builder = build_similarity_graph(document, self.config.similarity_threshold);
        let graph = CsrGraph::from_builder(&builder);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            nodes = graph.num_nodes,
            edges = graph.num_edges() / 2,
            isolated = graph.dangling_nodes().len(),
            "similarity graph built"
        );

        graph
    }

    /// Run the damped power iteration over a prebuilt graph.
    ///
    /// Non-convergence is not an error: the last vector is returned and a
    /// warning is logged.
    pub fn rank_graph(&self, graph: &CsrGraph, deadline: Option<Instant>) -> PageRankResult {
        let result = StandardPageRank::new()
            .with_damping(self.config.damping_factor)
            .with_max_iterations(self.config.max_iterations)
            .with_threshold(self.config.convergence_tolerance)
            .with_deadline(deadline)
            .run(graph);

        #[cfg(feature = "tracing")]
        {
            if !result.converged && !result.timed_out {
                tracing::warn!(
                    iterations = result.iterations,
                    delta = result.delta,
                    tolerance = self.config.convergence_tolerance,
                    "centrality did not converge, using last iterate"
                );
            }
        }

        result
    }

    /// Score every sentence of a document
    pub fn rank(&self, document: &Document) -> ScoreVector {
        let graph = self.build_graph(document);
        ScoreVector::from_pagerank(self.rank_graph(&graph, None))
    }
}

/// Convenience function to score sentences with LexRank
pub fn rank_sentences_lexrank(document: &Document, config: &SummaryConfig) -> ScoreVector {
    LexRank::with_config(config.clone()).rank(document)
}
