//! Python interface
//!
//! Exposes [`ReviewSummarizer`] to Python. Summarization releases the GIL,
//! so several Python threads can share one summarizer.

use crate::errors::SummaryError;
use crate::pipeline::runner::ReviewSummarizer;
use crate::summarizer::selector::SelectionOrder;
use crate::types::{RankedSentence, SummarizerConfig};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;
use std::sync::Arc;

fn to_py_err(err: SummaryError) -> PyErr {
    match err {
        SummaryError::UninitializedState => PyRuntimeError::new_err(err.to_string()),
        SummaryError::VectorLoad(_) | SummaryError::Config(_) => {
            PyValueError::new_err(err.to_string())
        }
    }
}

/// A summary sentence with its source and centrality score
#[pyclass(name = "RankedSentence")]
#[derive(Clone)]
pub struct PyRankedSentence {
    #[pyo3(get)]
    pub text: String,
    #[pyo3(get)]
    pub source: String,
    #[pyo3(get)]
    pub score: f64,
}

#[pymethods]
impl PyRankedSentence {
    fn __repr__(&self) -> String {
        format!(
            "RankedSentence(text='{}', source='{}', score={:.4})",
            self.text, self.source, self.score
        )
    }

    fn __str__(&self) -> String {
        self.text.clone()
    }
}

impl From<RankedSentence> for PyRankedSentence {
    fn from(s: RankedSentence) -> Self {
        Self {
            text: s.raw_text,
            source: s.source,
            score: s.score,
        }
    }
}

/// Consensus summarizer for reviews from several publications
#[pyclass(name = "ReviewSummarizer")]
pub struct PyReviewSummarizer {
    inner: Arc<ReviewSummarizer>,
}

#[pymethods]
impl PyReviewSummarizer {
    #[new]
    #[pyo3(signature = (word_vectors_path=None, config_json=None, order=None))]
    fn new(
        word_vectors_path: Option<String>,
        config_json: Option<&str>,
        order: Option<&str>,
    ) -> PyResult<Self> {
        let mut config = match config_json {
            Some(json) => SummarizerConfig::from_json_str(json).map_err(to_py_err)?,
            None => SummarizerConfig::default(),
        };
        if let Some(path) = word_vectors_path {
            config = config.with_word_vectors_path(path);
        }
        if let Some(order) = order {
            let order = order
                .parse::<SelectionOrder>()
                .map_err(PyValueError::new_err)?;
            config = config.with_order(order);
        }

        let inner = ReviewSummarizer::new(config).map_err(to_py_err)?;
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Load the word vectors; does nothing if they are already loaded
    fn load_word_vectors(&self, py: Python<'_>) -> PyResult<()> {
        let inner = Arc::clone(&self.inner);
        py.allow_threads(move || inner.load_word_vectors())
            .map_err(to_py_err)
    }

    #[getter]
    fn is_loaded(&self) -> bool {
        self.inner.is_loaded()
    }

    /// Summarize a `{source: review_text}` dict
    ///
    /// Sources are visited in dict order.
    #[pyo3(signature = (reviews, n=None))]
    fn summarize_reviews(
        &self,
        py: Python<'_>,
        reviews: &Bound<'_, PyDict>,
        n: Option<usize>,
    ) -> PyResult<Vec<PyRankedSentence>> {
        let documents = reviews
            .iter()
            .map(|(source, text)| Ok((source.extract::<String>()?, text.extract::<String>()?)))
            .collect::<PyResult<Vec<(String, String)>>>()?;
        let inner = Arc::clone(&self.inner);

        // Release the GIL for CPU-intensive ranking.
        let summary = py
            .allow_threads(move || inner.summarize_reviews(documents, n))
            .map_err(to_py_err)?;

        Ok(summary
            .sentences
            .into_iter()
            .map(PyRankedSentence::from)
            .collect())
    }

    /// The `n` most central sentences of a single text
    #[pyo3(signature = (text, n=None))]
    fn top_sentences(&self, py: Python<'_>, text: &str, n: Option<usize>) -> PyResult<Vec<String>> {
        let text = text.to_owned();
        let inner = Arc::clone(&self.inner);

        py.allow_threads(move || inner.top_sentences(&text, n))
            .map_err(to_py_err)
    }
}

/// Register classes with the Python module
pub fn register_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyRankedSentence>()?;
    m.add_class::<PyReviewSummarizer>()?;
    m.add("__version__", crate::VERSION)?;
    Ok(())
}
