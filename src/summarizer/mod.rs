//! Summarization components
//!
//! Provides extractive selection of the most central sentences, with
//! source attribution.

pub mod selector;
