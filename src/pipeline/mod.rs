//! Summarization pipeline
//!
//! [`runner::ReviewSummarizer`] chains vectorization, graph construction,
//! ranking and selection; [`observer`] exposes hooks at each stage boundary.

pub mod observer;
pub mod runner;
