//! # review_consensus
//!
//! Graph-based extractive summarization of album reviews.
//!
//! Several publications review the same album. Each review is split into
//! sentences, every sentence is embedded as the mean of its pretrained word
//! vectors, and sentences are connected by cosine similarity, but only
//! across publications. PageRank over that graph surfaces the sentences
//! most critics agree with.
//!
//! ## Features
//!
//! - **Consensus ranking**: same-source pairs carry no weight, so a
//!   sentence is central only when other publications echo it
//! - **Single-document mode**: classic TextRank over one text
//! - **Shared tables**: the word vector table is loaded once and shared
//!   read-only across calls and threads
//! - **Python bindings**: a `ReviewSummarizer` class via PyO3 (`python` feature)
//!
//! ```no_run
//! use review_consensus::{ReviewSummarizer, SummarizerConfig};
//!
//! let config = SummarizerConfig::new().with_word_vectors_path("glove.6B.50d.txt");
//! let summarizer = ReviewSummarizer::new(config)?;
//! summarizer.load_word_vectors()?;
//!
//! let reviews = [
//!     ("Pitchfork", "The album is dark. It is moody."),
//!     ("NME", "The record feels dark. It is intense."),
//! ];
//! let summary = summarizer.summarize_reviews(reviews, Some(2))?;
//! for sentence in &summary.sentences {
//!     println!("{sentence}");
//! }
//! # Ok::<(), review_consensus::SummaryError>(())
//! ```

pub mod embedding;
pub mod errors;
pub mod graph;
pub mod nlp;
pub mod pagerank;
pub mod pipeline;
pub mod summarizer;
pub mod types;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use errors::{Result, SummaryError, VectorLoadError};
pub use types::{RankedSentence, ReviewSentence, StopwordSource, Summary, SummarizerConfig};

// Re-export main functionality
pub use embedding::{table::WordVectorTable, vectorizer::SentenceVectorizer};
pub use graph::{
    builder::{GraphMode, SimilarityGraphBuilder},
    dense::SimilarityGraph,
};
pub use nlp::{normalizer::LexicalNormalizer, stopwords::StopwordFilter, tokenizer::Tokenizer};
pub use pagerank::{standard::StandardPageRank, PageRankResult};
pub use pipeline::{
    observer::{NoopObserver, PipelineObserver, StageReport, StageTimingObserver},
    runner::ReviewSummarizer,
};
pub use summarizer::selector::{SelectionOrder, SummarySelector};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Initialize the Python module
#[cfg(feature = "python")]
#[pymodule]
fn _rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    python::register_module(m)?;
    Ok(())
}
