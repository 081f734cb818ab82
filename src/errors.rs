//! Error types
//!
//! Degenerate inputs (empty sentences, zero vectors, isolated graph nodes,
//! empty corpora) are never errors. Only a missing or corrupt word vector
//! table and invalid configuration surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SummaryError>;

/// Top-level error for summarization calls
#[derive(Debug, Error)]
pub enum SummaryError {
    /// A summarization was attempted before any word vector table was
    /// loaded or injected
    #[error("word vectors not loaded: call load_word_vectors() or inject a table first")]
    UninitializedState,

    /// The word vector resource could not be loaded
    #[error(transparent)]
    VectorLoad(#[from] VectorLoadError),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SummaryError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Failure while parsing a word vector resource
///
/// Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum VectorLoadError {
    #[error("failed to read word vectors from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read word vectors at line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("word vector resource contains no records")]
    Empty,

    #[error("line {line}: word has no vector values")]
    MissingValues { line: usize },

    #[error("line {line}: field {field} is not a number: {value:?}")]
    InvalidValue {
        line: usize,
        field: usize,
        value: String,
    },

    #[error("line {line}: expected {expected} vector values, found {found}")]
    DimensionMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uninitialized_message_mentions_loading() {
        let err = SummaryError::UninitializedState;
        assert!(err.to_string().contains("load_word_vectors"));
    }

    #[test]
    fn test_vector_load_converts_transparently() {
        let err: SummaryError = VectorLoadError::InvalidValue {
            line: 3,
            field: 2,
            value: "abc".to_string(),
        }
        .into();

        assert!(matches!(err, SummaryError::VectorLoad(_)));
        assert_eq!(err.to_string(), "line 3: field 2 is not a number: \"abc\"");
    }
}
