//! Similarity graph builder
//!
//! Nodes are sentence indices; an undirected edge carries the cosine
//! similarity between the two sentences' term-frequency vectors. Adjacency is
//! kept in FxHashMaps for O(1) edge updates during construction.

use crate::summarizer::term_vector::TermVector;
use crate::types::Document;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// Documents with at least this many sentences build rows in parallel.
pub const PARALLEL_THRESHOLD: usize = 256;

/// A node in the graph builder
#[derive(Debug, Clone, Default)]
pub struct BuilderNode {
    /// Adjacency list: neighbor sentence index -> similarity
    pub edges: FxHashMap<u32, f64>,
}

/// A mutable, undirected similarity graph with one node per sentence
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    nodes: Vec<BuilderNode>,
}

impl GraphBuilder {
    /// Create a graph with `node_count` isolated nodes
    pub fn with_nodes(node_count: usize) -> Self {
        Self {
            nodes: vec![BuilderNode::default(); node_count],
        }
    }

    /// Set the weight of the undirected edge between two nodes.
    ///
    /// Self-loops and non-positive weights are ignored: a zero-weight edge is
    /// the same as no edge.
    pub fn set_edge(&mut self, a: u32, b: u32, weight: f64) {
        if a == b || !(weight > 0.0) {
            return;
        }
        if (a as usize) >= self.nodes.len() || (b as usize) >= self.nodes.len() {
            return;
        }

        self.nodes[a as usize].edges.insert(b, weight);
        self.nodes[b as usize].edges.insert(a, weight);
    }

    /// Build the graph from sentence vectors, comparing every unordered pair.
    ///
    /// Pairs whose similarity falls below `threshold` get no edge.
    pub fn from_vectors(vectors: &[TermVector], threshold: f64) -> Self {
        let mut builder = Self::with_nodes(vectors.len());

        for i in 0..vectors.len() {
            for (j, weight) in similarity_row(vectors, i, threshold) {
                builder.set_edge(i as u32, j, weight);
            }
        }

        builder
    }

    /// Weight of the edge between two nodes, zero if there is none
    pub fn weight(&self, a: u32, b: u32) -> f64 {
        self.nodes
            .get(a as usize)
            .and_then(|n| n.edges.get(&b))
            .copied()
            .unwrap_or(0.0)
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of edges (counting each undirected edge once)
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum::<usize>() / 2
    }

    /// Get a node by ID
    pub fn get_node(&self, id: u32) -> Option<&BuilderNode> {
        self.nodes.get(id as usize)
    }

    /// Iterate over all nodes
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &BuilderNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Similarities between sentence `i` and every later sentence that clear
/// the threshold.
fn similarity_row(vectors: &[TermVector], i: usize, threshold: f64) -> Vec<(u32, f64)> {
    let vi = &vectors[i];
    if vi.is_empty() {
        return Vec::new();
    }

    vectors[i + 1..]
        .iter()
        .enumerate()
        .filter_map(|(offset, vj)| {
            let weight = vi.cosine_similarity(vj);
            (weight > 0.0 && weight >= threshold).then_some(((i + 1 + offset) as u32, weight))
        })
        .collect()
}

/// Build the similarity graph with rows computed in parallel.
///
/// Produces the same graph as [`GraphBuilder::from_vectors`]; only the
/// pairwise similarity work is spread across the rayon pool.
pub fn build_graph_parallel(vectors: &[TermVector], threshold: f64) -> GraphBuilder {
    if vectors.len() < PARALLEL_THRESHOLD {
        return GraphBuilder::from_vectors(vectors, threshold);
    }

    let rows: Vec<Vec<(u32, f64)>> = (0..vectors.len())
        .into_par_iter()
        .map(|i| similarity_row(vectors, i, threshold))
        .collect();

    let mut builder = GraphBuilder::with_nodes(vectors.len());
    for (i, row) in rows.into_iter().enumerate() {
        for (j, weight) in row {
            builder.set_edge(i as u32, j, weight);
        }
    }

    builder
}

/// Build the similarity graph for a segmented document
pub fn build_similarity_graph(document: &Document, threshold: f64) -> GraphBuilder {
    let vectors: Vec<TermVector> = document
        .sentences()
        .iter()
        .map(TermVector::from_sentence)
        .collect();

    build_graph_parallel(&vectors, threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectors() -> Vec<TermVector> {
        vec![
            TermVector::from_terms(&[0, 1, 2]),
            TermVector::from_terms(&[0, 1, 3]),
            TermVector::from_terms(&[4, 5]),
            TermVector::from_terms(&[]),
        ]
    }

    #[test]
    fn test_one_node_per_sentence() {
        let builder = GraphBuilder::from_vectors(&vectors(), 0.0);
        assert_eq!(builder.node_count(), 4);
    }

    #[test]
    fn test_edges_are_symmetric() {
        let builder = GraphBuilder::from_vectors(&vectors(), 0.0);

        let w = builder.weight(0, 1);
        assert!(w > 0.0 && w <= 1.0);
        assert_eq!(w, builder.weight(1, 0));
        assert!((w - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_similarity_means_no_edge() {
        let builder = GraphBuilder::from_vectors(&vectors(), 0.0);

        assert_eq!(builder.weight(0, 2), 0.0);
        assert!(!builder.get_node(0).unwrap().edges.contains_key(&2));
        // The empty sentence is isolated
        assert!(builder.get_node(3).unwrap().edges.is_empty());
        assert_eq!(builder.edge_count(), 1);
    }

    #[test]
    fn test_threshold_drops_weak_edges() {
        let builder = GraphBuilder::from_vectors(&vectors(), 0.9);
        assert_eq!(builder.edge_count(), 0);
        assert_eq!(builder.node_count(), 4);
    }

    #[test]
    fn test_self_loops_prevented() {
        let mut builder = GraphBuilder::with_nodes(2);
        builder.set_edge(1, 1, 0.5);
        builder.set_edge(0, 5, 0.5);

        assert!(builder.get_node(1).unwrap().edges.is_empty());
        assert_eq!(builder.edge_count(), 0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let vectors: Vec<TermVector> = (0..PARALLEL_THRESHOLD + 10)
            .map(|i| {
                let i = i as u32;
                TermVector::from_terms(&[i % 7, i % 11, i % 13, 100 + i % 3])
            })
            .collect();

        let sequential = GraphBuilder::from_vectors(&vectors, 0.0);
        let parallel = build_graph_parallel(&vectors, 0.0);

        assert_eq!(sequential.node_count(), parallel.node_count());
        assert_eq!(sequential.edge_count(), parallel.edge_count());
        for (id, node) in sequential.nodes() {
            for (&target, &weight) in &node.edges {
                assert_eq!(parallel.weight(id, target), weight);
            }
        }
    }
}
