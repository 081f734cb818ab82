//! Natural Language Processing components
//!
//! This module provides sentence splitting, tokenization, stopword filtering
//! and the lexical normalization that feeds the sentence vectorizer.

pub mod normalizer;
pub mod stopwords;
pub mod tokenizer;
