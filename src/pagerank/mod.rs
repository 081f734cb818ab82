//! PageRank algorithms
//!
//! This module provides the damped power iteration used to score sentences
//! by their centrality in the similarity graph.

pub mod standard;

/// Result of a PageRank computation
#[derive(Debug, Clone, PartialEq)]
pub struct PageRankResult {
    /// Scores for each node (indexed by node ID)
    pub scores: Vec<f64>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Final convergence delta
    pub delta: f64,
    /// Whether the algorithm converged
    pub converged: bool,
}

impl PageRankResult {
    /// Create a new PageRank result
    pub fn new(scores: Vec<f64>, iterations: usize, delta: f64, converged: bool) -> Self {
        Self {
            scores,
            iterations,
            delta,
            converged,
        }
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
