//! Stopword filtering
//!
//! English stopword lists: the NLTK list (default), the stopwords-iso list
//! from the `stop-words` crate, or a custom list.

use crate::types::StopwordSource;
use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

/// The NLTK English stopword list
const NLTK_ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// A filter for removing stopwords from normalized tokens
///
/// Stored words are lowercase and lookups are case-insensitive.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::english()
    }
}

impl StopwordFilter {
    /// The NLTK English list
    pub fn english() -> Self {
        Self::from_list(NLTK_ENGLISH)
    }

    /// The stopwords-iso English list
    pub fn iso_english() -> Self {
        let stopwords = get(LANGUAGE::English)
            .iter()
            .map(|s| s.to_string().to_lowercase())
            .collect();
        Self { stopwords }
    }

    /// Create a stopword filter from a custom list
    pub fn from_list<S: AsRef<str>>(words: &[S]) -> Self {
        let stopwords = words.iter().map(|w| w.as_ref().to_lowercase()).collect();
        Self { stopwords }
    }

    /// Build the filter a configuration asks for
    pub fn from_source(source: &StopwordSource) -> Self {
        match source {
            StopwordSource::Nltk => Self::english(),
            StopwordSource::Iso => Self::iso_english(),
            StopwordSource::Custom(words) => Self::from_list(words),
        }
    }

    /// Check if a word is a stopword
    pub fn is_stopword(&self, word: &str) -> bool {
        if word.chars().any(char::is_uppercase) {
            self.stopwords.contains(&word.to_lowercase())
        } else {
            self.stopwords.contains(word)
        }
    }

    /// Get the number of stopwords in the filter
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Check if the filter is empty
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}
