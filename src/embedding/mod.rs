//! Word vectors and sentence embeddings
//!
//! The [`table::WordVectorTable`] is loaded once and shared; the
//! [`vectorizer::SentenceVectorizer`] turns sentences into fixed-dimension
//! embeddings using it.

pub mod table;
pub mod vector;
pub mod vectorizer;
