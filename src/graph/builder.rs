//! Similarity graph construction
//!
//! Every ordered pair of sentences is compared with cosine similarity. In
//! multi-document mode pairs from the same source are left at zero, so a
//! sentence only gains centrality through agreement with other
//! publications.

use super::dense::SimilarityGraph;
use crate::embedding::vector::{cosine_with_norms, norm};
use crate::types::ReviewSentence;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Corpora at least this large are compared in parallel by default
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Edge policy for the similarity graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphMode {
    /// Only sentences from different sources are connected
    #[default]
    MultiDocument,
    /// Every pair of distinct sentences is connected
    SingleDocument,
}

impl GraphMode {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "multi_document" | "multi-document" | "multi" | "reviews" => {
                Some(GraphMode::MultiDocument)
            }
            "single_document" | "single-document" | "single" | "document" => {
                Some(GraphMode::SingleDocument)
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MultiDocument => "multi_document",
            Self::SingleDocument => "single_document",
        }
    }
}

impl std::str::FromStr for GraphMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        GraphMode::parse(value).ok_or_else(|| format!("unknown graph mode: {value}"))
    }
}

impl std::fmt::Display for GraphMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds a [`SimilarityGraph`] over a sentence corpus
#[derive(Debug, Clone)]
pub struct SimilarityGraphBuilder {
    mode: GraphMode,
    parallel_threshold: usize,
}

impl Default for SimilarityGraphBuilder {
    fn default() -> Self {
        Self::new(GraphMode::default())
    }
}

impl SimilarityGraphBuilder {
    pub fn new(mode: GraphMode) -> Self {
        Self {
            mode,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Builder for the cross-source review graph
    pub fn multi_document() -> Self {
        Self::new(GraphMode::MultiDocument)
    }

    /// Builder for ranking sentences within a single document
    pub fn single_document() -> Self {
        Self::new(GraphMode::SingleDocument)
    }

    /// Set the corpus size from which rows are computed in parallel
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn mode(&self) -> GraphMode {
        self.mode
    }

    /// Build the graph; node `i` is `sentences[i]`
    pub fn build(&self, sentences: &[ReviewSentence]) -> SimilarityGraph {
        let n = sentences.len();
        let mut graph = SimilarityGraph::zeros(n);
        if n < 2 {
            return graph;
        }

        let norms: Vec<f64> = sentences.iter().map(|s| norm(&s.embedding)).collect();
        let fill_row = |(i, row): (usize, &mut [f64])| {
            for (j, weight) in row.iter_mut().enumerate() {
                *weight = self.pair_weight(sentences, &norms, i, j);
            }
        };

        // Rows are independent, so both paths produce identical matrices
        if n >= self.parallel_threshold {
            graph.rows_mut().par_chunks_mut(n).enumerate().for_each(fill_row);
        } else {
            graph.rows_mut().chunks_mut(n).enumerate().for_each(fill_row);
        }

        graph
    }

    fn pair_weight(&self, sentences: &[ReviewSentence], norms: &[f64], i: usize, j: usize) -> f64 {
        if i == j {
            return 0.0;
        }
        let (a, b) = (&sentences[i], &sentences[j]);
        if self.mode == GraphMode::MultiDocument && a.source == b.source {
            return 0.0;
        }
        cosine_with_norms(&a.embedding, norms[i], &b.embedding, norms[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(source: &str, embedding: Vec<f32>, index: usize) -> ReviewSentence {
        ReviewSentence::new(source, format!("sentence {index}"), embedding, index)
    }

    fn mixed_corpus() -> Vec<ReviewSentence> {
        vec![
            sentence("A", vec![1.0, 0.0], 0),
            sentence("A", vec![1.0, 0.1], 1),
            sentence("B", vec![0.9, 0.2], 2),
            sentence("B", vec![0.0, 1.0], 3),
            sentence("C", vec![0.0, 0.0], 4),
        ]
    }

    #[test]
    fn test_multi_document_excludes_same_source() {
        let corpus = mixed_corpus();
        let graph = SimilarityGraphBuilder::multi_document().build(&corpus);

        for i in 0..corpus.len() {
            assert_eq!(graph.weight(i, i), 0.0);
            for j in 0..corpus.len() {
                if corpus[i].source == corpus[j].source {
                    assert_eq!(graph.weight(i, j), 0.0);
                }
            }
        }
        assert!(graph.weight(0, 2) > 0.9);
    }

    #[test]
    fn test_single_document_connects_every_pair() {
        let corpus = mixed_corpus();
        let graph = SimilarityGraphBuilder::single_document().build(&corpus);

        assert!(graph.weight(0, 1) > 0.99);
        assert!(graph.is_symmetric());
        for i in 0..corpus.len() {
            assert_eq!(graph.weight(i, i), 0.0);
        }
    }

    #[test]
    fn test_zero_embedding_has_no_edges() {
        let corpus = mixed_corpus();
        let graph = SimilarityGraphBuilder::single_document().build(&corpus);

        assert!(graph.row(4).iter().all(|&w| w == 0.0));
        assert!((0..corpus.len()).all(|i| graph.weight(i, 4) == 0.0));
    }

    #[test]
    fn test_weights_within_cosine_range() {
        let corpus = vec![
            sentence("A", vec![1.0, 2.0], 0),
            sentence("B", vec![-1.0, -2.0], 1),
            sentence("C", vec![3.0, -0.5], 2),
        ];
        let graph = SimilarityGraphBuilder::multi_document().build(&corpus);

        assert!(graph.as_slice().iter().all(|w| (-1.0..=1.0).contains(w)));
        assert!((graph.weight(0, 1) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_sentence_graph_is_zero() {
        let corpus = vec![sentence("A", vec![1.0, 1.0], 0)];
        let graph = SimilarityGraphBuilder::single_document().build(&corpus);

        assert_eq!(graph.num_nodes(), 1);
        assert_eq!(graph.weight(0, 0), 0.0);
    }

    #[test]
    fn test_empty_corpus() {
        let graph = SimilarityGraphBuilder::multi_document().build(&[]);

        assert!(graph.is_empty());
    }

    #[test]
    fn test_parallel_build_matches_sequential() {
        let corpus: Vec<_> = (0..40)
            .map(|i| {
                let x = i as f32;
                sentence(
                    ["A", "B", "C"][i % 3],
                    vec![x.sin(), x.cos(), (x * 0.5).sin()],
                    i,
                )
            })
            .collect();

        let sequential = SimilarityGraphBuilder::multi_document()
            .with_parallel_threshold(usize::MAX)
            .build(&corpus);
        let parallel = SimilarityGraphBuilder::multi_document()
            .with_parallel_threshold(1)
            .build(&corpus);

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_graph_mode_parse() {
        assert_eq!("multi".parse::<GraphMode>(), Ok(GraphMode::MultiDocument));
        assert_eq!(
            "Single_Document".parse::<GraphMode>(),
            Ok(GraphMode::SingleDocument)
        );
        assert!("bogus".parse::<GraphMode>().is_err());
        assert_eq!(GraphMode::SingleDocument.to_string(), "single_document");
    }
}
