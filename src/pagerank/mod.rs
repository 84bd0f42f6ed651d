//! Centrality ranking
//!
//! Weighted PageRank over the sentence similarity graph, run to a fixed point
//! with power iteration.

pub mod standard;

/// Result of a PageRank computation
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// Scores for each node (indexed by node ID)
    pub scores: Vec<f64>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Final convergence delta
    pub delta: f64,
    /// Whether the algorithm converged
    pub converged: bool,
    /// Whether iteration stopped because the wall-clock deadline passed
    pub timed_out: bool,
}

impl PageRankResult {
    /// Create a new PageRank result
    pub fn new(scores: Vec<f64>, iterations: usize, delta: f64, converged: bool) -> Self {
        Self {
            scores,
            iterations,
            delta,
            converged,
            timed_out: false,
        }
    }

    /// Mark the result as cut short by a deadline
    pub fn with_timed_out(mut self, timed_out: bool) -> Self {
        self.timed_out = timed_out;
        self
    }

    /// Get top N nodes by score, ties going to the lower node ID
    pub fn top_n(&self, n: usize) -> Vec<(u32, f64)> {
        let mut indexed: Vec<_> = self
            .scores
            .iter()
            .enumerate()
            .map(|(i, &s)| (i as u32, s))
            .collect();
        indexed.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        indexed.truncate(n);
        indexed
    }

    /// Get the score for a specific node
    pub fn score(&self, node: u32) -> f64 {
        self.scores.get(node as usize).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_n_breaks_ties_by_index() {
        let result = PageRankResult::new(vec![0.2, 0.4, 0.2, 0.2], 3, 0.0, true);

        let top = result.top_n(3);
        assert_eq!(top.iter().map(|(i, _)| *i).collect::<Vec<_>>(), vec![1, 0, 2]);
    }

    #[test]
    fn test_score_out_of_range() {
        let result = PageRankResult::new(vec![1.0], 1, 0.0, true);
        assert_eq!(result.score(0), 1.0);
        assert_eq!(result.score(9), 0.0);
        assert!(!result.timed_out);
    }
}
