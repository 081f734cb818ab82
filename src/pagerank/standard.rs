//! Standard PageRank algorithm
//!
//! Power iteration over the dense similarity matrix with proper handling
//! of dangling nodes. Only positive weights carry endorsement: a negative
//! cosine similarity means two sentences disagree, and it neither adds to
//! a node's outgoing weight nor passes score along.

use super::PageRankResult;
use crate::graph::dense::SimilarityGraph;
use tracing::warn;

/// Standard PageRank implementation
#[derive(Debug, Clone)]
pub struct StandardPageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Convergence threshold on the L1 change between iterations
    pub threshold: f64,
}

impl Default for StandardPageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            threshold: 1e-6,
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

    /// Run PageRank on a graph
    ///
    /// Returns the result even if convergence wasn't achieved, with `converged=false`.
    pub fn run(&self, graph: &SimilarityGraph) -> PageRankResult {
        let n = graph.num_nodes();
        if n == 0 {
            return PageRankResult::new(vec![], 0, 0.0, true);
        }

        // Positive outgoing weight per node; zero marks a dangling node
        let out_weight: Vec<f64> = (0..n)
            .map(|node| graph.row(node).iter().filter(|&&w| w > 0.0).sum())
            .collect();
        let dangling_nodes: Vec<usize> = (0..n).filter(|&node| out_weight[node] == 0.0).collect();

        // Initialize scores uniformly
        let initial_score = 1.0 / n as f64;
        let mut scores = vec![initial_score; n];
        let mut new_scores = vec![0.0; n];

        let teleport = (1.0 - self.damping) / n as f64;
        let mut iterations = 0;
        let mut delta = f64::MAX;

        while iterations < self.max_iterations && delta > self.threshold {
            iterations += 1;

            // Dangling nodes spread their score uniformly
            let dangling_mass: f64 = dangling_nodes.iter().map(|&d| scores[d]).sum();
            let dangling_contribution = self.damping * dangling_mass / n as f64;

            new_scores.fill(teleport + dangling_contribution);

            // Propagate scores through edges
            for (node, &node_score) in scores.iter().enumerate() {
                let total_weight = out_weight[node];
                if total_weight > 0.0 {
                    let share = self.damping * node_score / total_weight;
                    for (neighbor, weight) in graph.neighbors(node) {
                        if weight > 0.0 {
                            new_scores[neighbor] += share * weight;
                        }
                    }
                }
            }

            // Calculate convergence delta (L1 norm)
            delta = scores
                .iter()
                .zip(new_scores.iter())
                .map(|(old, new)| (old - new).abs())
                .sum();

            std::mem::swap(&mut scores, &mut new_scores);
        }

        // Normalize scores (they should already sum to ~1, but ensure numerical stability)
        let sum: f64 = scores.iter().sum();
        if sum > 0.0 {
            for score in &mut scores {
                *score /= sum;
            }
        }

        let converged = delta <= self.threshold;
        if !converged {
            warn!(
                iterations,
                delta,
                threshold = self.threshold,
                "pagerank stopped at iteration cap without converging"
            );
        }

        PageRankResult::new(scores, iterations, delta, converged)
    }
}
