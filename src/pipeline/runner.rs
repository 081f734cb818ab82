//! Pipeline runner: stage execution and artifact flow
//!
//! [`ReviewSummarizer`] owns the configuration and the shared word vector
//! table. Each summarization call runs four stages in order, threading
//! per-call artifacts between them and notifying a [`PipelineObserver`] at
//! each boundary:
//!
//! 1. `vectorize` splits documents into sentences and embeds them
//! 2. `graph` builds the cosine similarity matrix
//! 3. `rank` runs PageRank over the matrix
//! 4. `select` keeps the top sentences
//!
//! The table is stored in a [`OnceLock`], so concurrent calls read it
//! without locking and a second load is a no-op.

use crate::embedding::table::WordVectorTable;
use crate::embedding::vectorizer::SentenceVectorizer;
use crate::errors::{Result, SummaryError};
use crate::graph::builder::{GraphMode, SimilarityGraphBuilder};
use crate::nlp::normalizer::LexicalNormalizer;
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tokenizer::Tokenizer;
use crate::pagerank::standard::StandardPageRank;
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReportBuilder, STAGE_GRAPH, STAGE_RANK,
    STAGE_SELECT, STAGE_VECTORIZE,
};
use crate::summarizer::selector::SummarySelector;
use crate::types::{Summary, SummarizerConfig};
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Enter a tracing span for a pipeline stage
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

/// Consensus summarizer over a shared word vector table
#[derive(Debug)]
pub struct ReviewSummarizer {
    config: SummarizerConfig,
    normalizer: LexicalNormalizer,
    vectorizer: OnceLock<SentenceVectorizer>,
}

impl ReviewSummarizer {
    /// Create a summarizer with no table; call
    /// [`load_word_vectors`](Self::load_word_vectors) before summarizing
    pub fn new(config: SummarizerConfig) -> Result<Self> {
        config.validate()?;
        let stopwords = StopwordFilter::from_source(&config.stopwords);
        Ok(Self {
            normalizer: LexicalNormalizer::new(Tokenizer::new(), stopwords),
            config,
            vectorizer: OnceLock::new(),
        })
    }

    /// Create a summarizer around an already loaded table
    pub fn with_table(config: SummarizerConfig, table: Arc<WordVectorTable>) -> Result<Self> {
        let summarizer = Self::new(config)?;
        summarizer.install(table)?;
        Ok(summarizer)
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        self.vectorizer.get().is_some()
    }

    /// The shared table, once loaded or injected
    pub fn table(&self) -> Option<Arc<WordVectorTable>> {
        self.vectorizer.get().map(SentenceVectorizer::shared_table)
    }

    /// Load the table named by `word_vectors_path`
    ///
    /// Does nothing when a table is already present.
    pub fn load_word_vectors(&self) -> Result<()> {
        if self.is_loaded() {
            debug!("word vectors already loaded");
            return Ok(());
        }
        let path = self
            .config
            .word_vectors_path
            .as_deref()
            .ok_or_else(|| SummaryError::config("word_vectors_path is not set"))?;
        self.load_word_vectors_from(path)
    }

    /// Load the table from an explicit path
    ///
    /// Does nothing when a table is already present.
    pub fn load_word_vectors_from(&self, path: impl AsRef<Path>) -> Result<()> {
        if self.is_loaded() {
            debug!("word vectors already loaded");
            return Ok(());
        }
        let table = WordVectorTable::load_with_dimension(path, self.config.expected_dimension)?;
        self.install(Arc::new(table))
    }

    fn install(&self, table: Arc<WordVectorTable>) -> Result<()> {
        if let Some(expected) = self.config.expected_dimension {
            if table.dimension() != expected {
                return Err(SummaryError::config(format!(
                    "word vectors have dimension {}, expected {expected}",
                    table.dimension()
                )));
            }
        }
        let vectorizer = SentenceVectorizer::new(table).with_normalizer(self.normalizer.clone());
        // A concurrent load may have won the race; its table is kept
        if self.vectorizer.set(vectorizer).is_err() {
            debug!("word vectors installed concurrently, keeping the first table");
        }
        Ok(())
    }

    fn vectorizer(&self) -> Result<&SentenceVectorizer> {
        self.vectorizer.get().ok_or(SummaryError::UninitializedState)
    }

    /// Summarize reviews of the same item from several sources
    ///
    /// Sentences only gain centrality through agreement with other
    /// sources. Sources are visited in the order supplied.
    pub fn summarize_reviews<I, S, T>(&self, reviews: I, n: Option<usize>) -> Result<Summary>
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        self.run_with_observer(reviews, GraphMode::MultiDocument, n, &mut NoopObserver)
    }

    /// Rank the sentences of one document against each other
    pub fn summarize_document(&self, text: &str, n: Option<usize>) -> Result<Summary> {
        self.summarize_document_from("", text, n)
    }

    /// Like [`summarize_document`](Self::summarize_document), attributing
    /// every sentence to `source`
    pub fn summarize_document_from(
        &self,
        source: &str,
        text: &str,
        n: Option<usize>,
    ) -> Result<Summary> {
        self.run_with_observer(
            [(source, text)],
            GraphMode::SingleDocument,
            n,
            &mut NoopObserver,
        )
    }

    /// The `n` most central sentences of a document, most central first
    pub fn top_sentences(&self, text: &str, n: Option<usize>) -> Result<Vec<String>> {
        let summary = self.summarize_document(text, n)?;
        Ok(summary.sentences.into_iter().map(|s| s.raw_text).collect())
    }

    /// Run every stage, reporting to `observer`
    pub fn run_with_observer<I, S, T>(
        &self,
        documents: I,
        mode: GraphMode,
        n: Option<usize>,
        observer: &mut impl PipelineObserver,
    ) -> Result<Summary>
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let vectorizer = self.vectorizer()?;

        // Stage 1: Vectorize
        let sentences = {
            trace_stage!(STAGE_VECTORIZE);
            observer.on_stage_start(STAGE_VECTORIZE);
            let clock = StageClock::start();
            let sentences = vectorizer.vectorize_documents(documents);
            let report = StageReportBuilder::new(clock.elapsed())
                .nodes(sentences.len())
                .build();
            debug!(sentences = sentences.len(), "vectorized corpus");
            observer.on_stage_end(STAGE_VECTORIZE, &report);
            observer.on_sentences(&sentences);
            sentences
        };

        // Stage 2: Build graph
        let graph = {
            trace_stage!(STAGE_GRAPH);
            observer.on_stage_start(STAGE_GRAPH);
            let clock = StageClock::start();
            let graph = SimilarityGraphBuilder::new(mode)
                .with_parallel_threshold(self.config.parallel_threshold)
                .build(&sentences);
            let report = StageReportBuilder::new(clock.elapsed())
                .nodes(graph.num_nodes())
                .edges(graph.num_edges())
                .build();
            debug!(
                mode = %mode,
                nodes = graph.num_nodes(),
                edges = graph.num_edges(),
                "built similarity graph"
            );
            observer.on_stage_end(STAGE_GRAPH, &report);
            observer.on_graph(&graph);
            graph
        };

        // Stage 3: Rank
        let ranking = {
            trace_stage!(STAGE_RANK);
            observer.on_stage_start(STAGE_RANK);
            let clock = StageClock::start();
            let ranking = StandardPageRank::new()
                .with_damping(self.config.damping)
                .with_max_iterations(self.config.max_iterations)
                .with_threshold(self.config.convergence_threshold)
                .run(&graph);
            let report = StageReportBuilder::new(clock.elapsed())
                .nodes(ranking.len())
                .iterations(ranking.iterations)
                .converged(ranking.converged)
                .residual(ranking.delta)
                .build();
            debug!(
                iterations = ranking.iterations,
                converged = ranking.converged,
                delta = ranking.delta,
                "ranked sentences"
            );
            observer.on_stage_end(STAGE_RANK, &report);
            observer.on_rank(&ranking);
            ranking
        };

        // Stage 4: Select
        trace_stage!(STAGE_SELECT);
        observer.on_stage_start(STAGE_SELECT);
        let clock = StageClock::start();
        let selected = SummarySelector::new()
            .with_order(self.config.order)
            .select(&sentences, &ranking.scores, n);
        let report = StageReportBuilder::new(clock.elapsed())
            .nodes(selected.len())
            .build();
        debug!(selected = selected.len(), "selected summary sentences");
        observer.on_stage_end(STAGE_SELECT, &report);

        Ok(Summary {
            sentences: selected,
            num_sentences: sentences.len(),
            iterations: ranking.iterations,
            converged: ranking.converged,
        })
    }
}
