//! Standard PageRank algorithm
//!
//! Classic weighted PageRank with power iteration. Each node's outgoing
//! weights are row-normalized into transition probabilities; isolated nodes
//! spread their mass uniformly over every node.

use super::PageRankResult;
use crate::graph::csr::CsrGraph;
use std::time::Instant;

/// Standard PageRank implementation
#[derive(Debug, Clone)]
pub struct StandardPageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Convergence threshold on the L1 change between iterations
    pub threshold: f64,
    /// Optional wall-clock deadline; iteration stops once it has passed
    pub deadline: Option<Instant>,
}

impl Default for StandardPageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            threshold: 1e-4,
            deadline: None,
        }
    }
}

impl StandardPageRank {
    /// Create a new StandardPageRank with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the wall-clock deadline
    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Run PageRank on a graph
    ///
    /// Returns the last computed vector even if convergence wasn't achieved,
    /// with `converged=false`. If the deadline passes first, `timed_out` is
    /// set as well.
    pub fn run(&self, graph: &CsrGraph) -> PageRankResult {
        let n = graph.num_nodes;
        if n == 0 {
            return PageRankResult::new(vec![], 0, 0.0, true);
        }

        let initial_score = 1.0 / n as f64;
        let mut scores = vec![initial_score; n];
        let mut new_scores = vec![0.0; n];

        let dangling_nodes = graph.dangling_nodes();

        let teleport = (1.0 - self.damping) / n as f64;
        let mut iterations = 0;
        let mut delta = f64::MAX;
        let mut timed_out = false;

        while iterations < self.max_iterations && delta > self.threshold {
            if self.deadline.is_some_and(|d| Instant::now() >= d) {
                timed_out = true;
                break;
            }
            iterations += 1;

            let dangling_mass: f64 = dangling_nodes.iter().map(|&d| scores[d as usize]).sum();
            let dangling_contribution = self.damping * dangling_mass / n as f64;

            new_scores.fill(teleport + dangling_contribution);

            for (node, &node_score) in scores.iter().enumerate() {
                let total_weight = graph.node_total_weight(node as u32);

                if total_weight > 0.0 {
                    for (neighbor, weight) in graph.neighbors(node as u32) {
                        let contribution = self.damping * node_score * weight / total_weight;
                        new_scores[neighbor as usize] += contribution;
                    }
                }
            }

            delta = scores
                .iter()
                .zip(new_scores.iter())
                .map(|(old, new)| (old - new).abs())
                .sum();

            std::mem::swap(&mut scores, &mut new_scores);
        }

        // Keep the output a distribution despite rounding drift
        let sum: f64 = scores.iter().sum();
        if sum > 0.0 {
            for score in &mut scores {
                *score /= sum;
            }
        }

        PageRankResult::new(scores, iterations, delta, delta <= self.threshold)
            .with_timed_out(timed_out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;

    fn build_triangle_graph() -> CsrGraph {
        let mut builder = GraphBuilder::with_nodes(3);
        builder.set_edge(0, 1, 0.5);
        builder.set_edge(1, 2, 0.5);
        builder.set_edge(2, 0, 0.5);

        CsrGraph::from_builder(&builder)
    }

    fn build_star_graph() -> CsrGraph {
        // Hub (0) similar to 3 spokes
        let mut builder = GraphBuilder::with_nodes(4);
        builder.set_edge(0, 1, 0.5);
        builder.set_edge(0, 2, 0.5);
        builder.set_edge(0, 3, 0.5);

        CsrGraph::from_builder(&builder)
    }

    #[test]
    fn test_triangle_graph_equal_scores() {
        let result = StandardPageRank::new().run(&build_triangle_graph());

        assert!(result.converged);
        let expected = 1.0 / 3.0;
        for score in &result.scores {
            assert!((score - expected).abs() < 0.01);
        }
    }

    #[test]
    fn test_star_graph_hub_highest() {
        let result = StandardPageRank::new().run(&build_star_graph());

        assert!(result.converged);
        let hub_score = result.scores[0];
        for &score in &result.scores[1..] {
            assert!(hub_score > score);
        }
    }

    #[test]
    fn test_scores_sum_to_one() {
        let result = StandardPageRank::new().run(&build_star_graph());

        let sum: f64 = result.scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(result.scores.iter().all(|&s| s >= 0.0));
    }

    #[test]
    fn test_isolated_nodes_spread_uniformly() {
        // No edges at all: every node is isolated, scores stay uniform
        let graph = CsrGraph::from_builder(&GraphBuilder::with_nodes(4));
        let result = StandardPageRank::new().run(&graph);

        assert!(result.converged);
        for score in &result.scores {
            assert!((score - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn test_empty_graph() {
        let result = StandardPageRank::new().run(&CsrGraph::default());

        assert!(result.converged);
        assert!(result.scores.is_empty());
    }

    #[test]
    fn test_max_iterations_returns_partial() {
        let pr = StandardPageRank::new()
            .with_max_iterations(1)
            .with_threshold(0.0);

        let result = pr.run(&build_star_graph());

        assert_eq!(result.iterations, 1);
        assert!(!result.converged);
        assert!(!result.timed_out);
        assert_eq!(result.scores.len(), 4);
        let sum: f64 = result.scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_expired_deadline_stops_iteration() {
        let pr = StandardPageRank::new().with_deadline(Some(Instant::now()));

        let result = pr.run(&build_star_graph());

        assert!(result.timed_out);
        assert!(!result.converged);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.scores.len(), 4);
    }

    #[test]
    fn test_damping_factor() {
        let graph = build_star_graph();

        let result_low = StandardPageRank::new().with_damping(0.5).run(&graph);
        let result_high = StandardPageRank::new().with_damping(0.95).run(&graph);

        let hub_advantage_low = result_low.scores[0] - result_low.scores[1];
        let hub_advantage_high = result_high.scores[0] - result_high.scores[1];

        assert!(hub_advantage_high > hub_advantage_low);
    }

    #[test]
    fn test_top_n() {
        let result = StandardPageRank::new().run(&build_star_graph());

        let top_2 = result.top_n(2);
        assert_eq!(top_2.len(), 2);
        assert_eq!(top_2[0].0, 0);
        // Spokes tie; the lowest index wins
        assert_eq!(top_2[1].0, 1);
    }
}
