//! Core data types
//!
//! Per-call artifacts ([`ReviewSentence`], [`RankedSentence`], [`Summary`])
//! and the [`SummarizerConfig`] shared by every stage.

use crate::errors::{Result, SummaryError};
use crate::summarizer::selector::SelectionOrder;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One sentence of the corpus being summarized
///
/// Sentences are addressed by `index`, their position in corpus order. The
/// embedding always has the table's dimension, even when no token of the
/// sentence survived normalization (the zero vector).
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSentence {
    /// Publication (or document) that owns the sentence
    pub source: String,
    /// Sentence text as it appears in the document, trimmed
    pub raw_text: String,
    /// Mean of the sentence's word vectors
    pub embedding: Vec<f32>,
    /// Position in corpus order
    pub index: usize,
}

impl ReviewSentence {
    pub fn new(
        source: impl Into<String>,
        raw_text: impl Into<String>,
        embedding: Vec<f32>,
        index: usize,
    ) -> Self {
        Self {
            source: source.into(),
            raw_text: raw_text.into(),
            embedding,
            index,
        }
    }
}

/// A selected sentence with its attribution and centrality score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSentence {
    pub raw_text: String,
    pub source: String,
    pub score: f64,
}

impl std::fmt::Display for RankedSentence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.source.is_empty() {
            write!(f, "{}", self.raw_text)
        } else {
            write!(f, "{} ({})", self.raw_text, self.source)
        }
    }
}

/// Result of one summarization call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Selected sentences, most central first (or in corpus order)
    pub sentences: Vec<RankedSentence>,
    /// Number of sentences in the corpus that was ranked
    pub num_sentences: usize,
    /// Power iterations performed by the ranker
    pub iterations: usize,
    /// Whether the ranker converged before the iteration cap
    pub converged: bool,
}

impl Summary {
    /// Raw sentence texts in output order
    pub fn texts(&self) -> Vec<&str> {
        self.sentences.iter().map(|s| s.raw_text.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// Which stop-word list the lexical normalizer filters with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopwordSource {
    /// The NLTK English list
    #[default]
    Nltk,
    /// The stopwords-iso English list shipped with the `stop-words` crate
    Iso,
    /// A caller-supplied list
    Custom(Vec<String>),
}

/// Configuration for [`ReviewSummarizer`](crate::pipeline::runner::ReviewSummarizer)
///
/// Every field has a default, so `{}` is a valid JSON configuration.
///
/// ```json
/// {
///   "word_vectors_path": "glove.6B/glove.6B.50d.txt",
///   "damping": 0.85,
///   "max_iterations": 100,
///   "order": "rank"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Location of the `word v1 .. vD` text resource
    pub word_vectors_path: Option<PathBuf>,
    /// Reject resources whose vectors do not have this dimension
    pub expected_dimension: Option<usize>,
    /// PageRank damping factor
    pub damping: f64,
    /// Iteration cap for the ranker
    pub max_iterations: usize,
    /// L1 convergence threshold for the ranker
    pub convergence_threshold: f64,
    pub stopwords: StopwordSource,
    /// Corpora at least this large build the similarity graph in parallel
    pub parallel_threshold: usize,
    /// Output order of the selected sentences
    pub order: SelectionOrder,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            word_vectors_path: None,
            expected_dimension: None,
            damping: 0.85,
            max_iterations: 100,
            convergence_threshold: 1e-6,
            stopwords: StopwordSource::Nltk,
            parallel_threshold: 256,
            order: SelectionOrder::Rank,
        }
    }
}

impl SummarizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SummaryError::config(format!("malformed JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| SummaryError::config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    pub fn with_word_vectors_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.word_vectors_path = Some(path.into());
        self
    }

    pub fn with_expected_dimension(mut self, dimension: usize) -> Self {
        self.expected_dimension = Some(dimension);
        self
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    pub fn with_stopwords(mut self, stopwords: StopwordSource) -> Self {
        self.stopwords = stopwords;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn with_order(mut self, order: SelectionOrder) -> Self {
        self.order = order;
        self
    }

    /// Check parameter ranges
    pub fn validate(&self) -> Result<()> {
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(SummaryError::config(format!(
                "damping must be in (0, 1), got {}",
                self.damping
            )));
        }
        if self.max_iterations == 0 {
            return Err(SummaryError::config("max_iterations must be at least 1"));
        }
        if !self.convergence_threshold.is_finite() || self.convergence_threshold < 0.0 {
            return Err(SummaryError::config(format!(
                "convergence_threshold must be a non-negative number, got {}",
                self.convergence_threshold
            )));
        }
        if self.expected_dimension == Some(0) {
            return Err(SummaryError::config("expected_dimension must be at least 1"));
        }
        Ok(())
    }
}
