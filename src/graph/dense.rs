//! Dense similarity matrix
//!
//! Sentence corpora are small (hundreds of sentences) and the similarity
//! graph is close to complete, so a row-major `n x n` matrix is both simpler
//! and faster to iterate than a sparse representation.

/// Weighted graph over the sentences of one summarization call
///
/// Entry `(i, j)` is the weight of the edge from sentence `i` to sentence
/// `j`. The diagonal is always zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityGraph {
    num_nodes: usize,
    weights: Vec<f64>,
}

impl SimilarityGraph {
    /// An `n x n` graph with no edges
    pub fn zeros(num_nodes: usize) -> Self {
        Self {
            num_nodes,
            weights: vec![0.0; num_nodes * num_nodes],
        }
    }

    /// Wrap a row-major weight buffer
    ///
    /// # Panics
    ///
    /// Panics if `weights.len() != num_nodes * num_nodes`.
    pub fn from_weights(num_nodes: usize, mut weights: Vec<f64>) -> Self {
        assert_eq!(
            weights.len(),
            num_nodes * num_nodes,
            "weight buffer must be num_nodes squared"
        );
        for i in 0..num_nodes {
            weights[i * num_nodes + i] = 0.0;
        }
        Self { num_nodes, weights }
    }

    /// Build from nested rows
    ///
    /// # Panics
    ///
    /// Panics if the rows do not form a square matrix.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        let n = rows.len();
        assert!(rows.iter().all(|r| r.len() == n), "matrix must be square");
        Self::from_weights(n, rows.into_iter().flatten().collect())
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Weight of the edge `from -> to`
    pub fn weight(&self, from: usize, to: usize) -> f64 {
        self.weights[from * self.num_nodes + to]
    }

    /// Outgoing weights of `node`, indexed by target
    pub fn row(&self, node: usize) -> &[f64] {
        let start = node * self.num_nodes;
        &self.weights[start..start + self.num_nodes]
    }

    /// Iterate over `(target, weight)` for every non-zero outgoing edge
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.row(node)
            .iter()
            .enumerate()
            .filter(|&(_, &w)| w != 0.0)
            .map(|(j, &w)| (j, w))
    }

    /// Number of non-zero directed edges
    pub fn num_edges(&self) -> usize {
        self.weights.iter().filter(|&&w| w != 0.0).count()
    }

    /// Check `weight(i, j) == weight(j, i)` for every pair
    pub fn is_symmetric(&self) -> bool {
        (0..self.num_nodes).all(|i| {
            ((i + 1)..self.num_nodes).all(|j| self.weight(i, j) == self.weight(j, i))
        })
    }

    /// Row-major weight buffer
    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [f64] {
        &mut self.weights
    }
}
