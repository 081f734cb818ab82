//! Lexical normalization
//!
//! Turns a sentence into the lowercase content words used for embedding.

use super::stopwords::StopwordFilter;
use super::tokenizer::Tokenizer;

/// Tokenize, lowercase, drop non-alphabetic tokens, drop stopwords
#[derive(Debug, Clone, Default)]
pub struct LexicalNormalizer {
    tokenizer: Tokenizer,
    stopwords: StopwordFilter,
}

impl LexicalNormalizer {
    pub fn new(tokenizer: Tokenizer, stopwords: StopwordFilter) -> Self {
        Self {
            tokenizer,
            stopwords,
        }
    }

    pub fn with_stopwords(mut self, stopwords: StopwordFilter) -> Self {
        self.stopwords = stopwords;
        self
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Normalize a sentence into its content words, in order
    ///
    /// A token with any non-alphabetic character is discarded whole, so
    /// `"2019"`, `"n't"` and `"mp3"` never survive. The result may be empty.
    pub fn normalize(&self, sentence: &str) -> Vec<String> {
        self.tokenizer
            .tokenize(sentence)
            .into_iter()
            .map(str::to_lowercase)
            .filter(|token| !token.is_empty() && token.chars().all(char::is_alphabetic))
            .filter(|token| !self.stopwords.is_stopword(token))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_drops_stopwords() {
        let normalizer = LexicalNormalizer::default();

        assert_eq!(normalizer.normalize("The album is dark."), vec!["album", "dark"]);
    }

    #[test]
    fn test_normalize_drops_non_alphabetic_tokens() {
        let normalizer = LexicalNormalizer::default();
        let tokens = normalizer.normalize("Track 7 on the LP2 runs 4:33, mostly ambient.");

        assert_eq!(tokens, vec!["track", "runs", "mostly", "ambient"]);
    }

    #[test]
    fn test_normalize_drops_compounds_whole() {
        let normalizer = LexicalNormalizer::default();
        let tokens = normalizer.normalize("A self-titled lo-fi synth-pop record.");

        assert_eq!(tokens, vec!["record"]);
    }

    #[test]
    fn test_normalize_contractions() {
        let normalizer = LexicalNormalizer::default();
        let tokens = normalizer.normalize("The band's sound doesn't age.");

        // "'s" and "n't" carry punctuation; "does" is a stopword
        assert_eq!(tokens, vec!["band", "sound", "age"]);
    }

    #[test]
    fn test_normalize_only_stopwords() {
        let normalizer = LexicalNormalizer::default();

        assert!(normalizer.normalize("It is the and of").is_empty());
    }

    #[test]
    fn test_normalize_empty_input() {
        let normalizer = LexicalNormalizer::default();

        assert!(normalizer.normalize("").is_empty());
        assert!(normalizer.normalize("?!...").is_empty());
    }

    #[test]
    fn test_normalize_keeps_unicode_letters() {
        let normalizer = LexicalNormalizer::default();

        assert_eq!(normalizer.normalize("Sigur Rós"), vec!["sigur", "rós"]);
    }

    #[test]
    fn test_custom_stopwords() {
        let normalizer =
            LexicalNormalizer::default().with_stopwords(StopwordFilter::from_list(&["album"]));

        assert_eq!(normalizer.normalize("The album is dark"), vec!["the", "is", "dark"]);
    }
}
