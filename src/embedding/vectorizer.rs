//! Sentence vectorization
//!
//! A sentence embedding is the mean of the word vectors of its normalized
//! tokens. Unknown words contribute the zero vector but still count toward
//! the mean.

use super::table::WordVectorTable;
use crate::nlp::normalizer::LexicalNormalizer;
use crate::types::ReviewSentence;
use std::sync::Arc;

/// Embeds sentences with an injected, shared word vector table
#[derive(Debug, Clone)]
pub struct SentenceVectorizer {
    table: Arc<WordVectorTable>,
    normalizer: LexicalNormalizer,
}

impl SentenceVectorizer {
    /// Create a vectorizer with the default normalizer
    pub fn new(table: Arc<WordVectorTable>) -> Self {
        Self {
            table,
            normalizer: LexicalNormalizer::default(),
        }
    }

    pub fn with_normalizer(mut self, normalizer: LexicalNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn table(&self) -> &WordVectorTable {
        &self.table
    }

    /// Another handle to the shared table
    pub fn shared_table(&self) -> Arc<WordVectorTable> {
        Arc::clone(&self.table)
    }

    pub fn normalizer(&self) -> &LexicalNormalizer {
        &self.normalizer
    }

    /// Dimension of every embedding this vectorizer produces
    pub fn dimension(&self) -> usize {
        self.table.dimension()
    }

    /// Embed one sentence
    pub fn embed(&self, sentence: &str) -> Vec<f32> {
        let tokens = self.normalizer.normalize(sentence);
        self.embed_tokens(&tokens)
    }

    /// Mean of the token vectors; the zero vector for an empty token list
    pub fn embed_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<f32> {
        let dimension = self.table.dimension();
        if tokens.is_empty() {
            return vec![0.0; dimension];
        }

        let mut sum = vec![0.0f64; dimension];
        for token in tokens {
            let vector = self.table.lookup(token.as_ref());
            for (acc, &value) in sum.iter_mut().zip(vector) {
                *acc += f64::from(value);
            }
        }

        let count = tokens.len() as f64;
        sum.into_iter().map(|acc| (acc / count) as f32).collect()
    }

    /// Split each document into sentences and embed them
    ///
    /// Sentences are numbered in corpus order: documents in iteration
    /// order, sentences in reading order within each document.
    pub fn vectorize_documents<I, S, T>(&self, documents: I) -> Vec<ReviewSentence>
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut sentences = Vec::new();
        for (source, text) in documents {
            let source = source.as_ref();
            for raw in self.normalizer.tokenizer().split_sentences(text.as_ref()) {
                let index = sentences.len();
                sentences.push(ReviewSentence::new(source, raw, self.embed(raw), index));
            }
        }
        sentences
    }
}
