//! Graph construction and representation
//!
//! This module builds the sentence similarity graph that the ranker walks.

pub mod builder;
pub mod dense;
