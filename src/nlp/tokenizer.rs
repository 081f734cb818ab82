//! Sentence and word tokenization
//!
//! Sentence and word boundaries follow Unicode UAX #29 via
//! `unicode-segmentation`. On top of that, sentence breaks after common
//! English abbreviations are suppressed, hyphen and slash compounds stay
//! single tokens, and English contractions are split the way Treebank-style
//! tokenizers do (`don't` -> `do` `n't`).

use rustc_hash::FxHashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Abbreviations that always precede a name, so never end a sentence
const TITLES: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "rev", "st", "mt", "vs", "feat", "ft",
];

/// Abbreviations that end a sentence unless lowercase text or a number
/// follows (`No. 1`, `Vol. 2`, `e.g. the`)
const ABBREVIATIONS: &[&str] = &[
    "jr", "sr", "etc", "e.g", "i.e", "cf", "approx", "vol", "no", "nos", "inc", "ltd", "co",
    "corp", "dept", "est", "op",
];

/// Clitic suffixes split off after an apostrophe
const CLITICS: &[&str] = &["s", "m", "d", "ll", "re", "ve"];

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

/// Characters that join two words into one compound token
fn is_compound_joiner(gap: &str) -> bool {
    gap == "-" || gap == "/"
}

/// Sentence splitter and word tokenizer
#[derive(Debug, Clone)]
pub struct Tokenizer {
    titles: FxHashSet<&'static str>,
    abbreviations: FxHashSet<&'static str>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// Create a tokenizer with the built-in English abbreviation lists
    pub fn new() -> Self {
        Self {
            titles: TITLES.iter().copied().collect(),
            abbreviations: ABBREVIATIONS.iter().copied().collect(),
        }
    }

    /// Split a document into trimmed, non-empty sentences
    pub fn split_sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut start: Option<usize> = None;

        for (offset, segment) in text.split_sentence_bound_indices() {
            let begin = *start.get_or_insert(offset);
            let end = offset + segment.len();

            if end < text.len() && self.continues_after(segment.trim_end(), &text[end..]) {
                continue;
            }

            let sentence = text[begin..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = None;
        }

        if let Some(begin) = start {
            let sentence = text[begin..].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
        }

        sentences
    }

    /// Split a sentence into word tokens
    ///
    /// Punctuation-only segments are dropped. Words joined by `-` or `/`
    /// with no surrounding space stay one token (`lo-fi`, `AC/DC`).
    /// Contractions are split into the stem and the clitic
    /// (`album's` -> `album` `'s`).
    pub fn tokenize<'a>(&self, sentence: &'a str) -> Vec<&'a str> {
        let mut tokens = Vec::new();
        let mut span: Option<(usize, usize)> = None;

        for (offset, word) in sentence.unicode_word_indices() {
            let end = offset + word.len();
            span = match span {
                Some((begin, last)) if is_compound_joiner(&sentence[last..offset]) => {
                    Some((begin, end))
                }
                Some((begin, last)) => {
                    push_word(&mut tokens, &sentence[begin..last]);
                    Some((offset, end))
                }
                None => Some((offset, end)),
            };
        }
        if let Some((begin, last)) = span {
            push_word(&mut tokens, &sentence[begin..last]);
        }

        tokens
    }

    /// Whether the sentence segment ending in `segment` runs on into `rest`
    fn continues_after(&self, segment: &str, rest: &str) -> bool {
        let Some(body) = segment.strip_suffix('.') else {
            return false;
        };
        let last_word = body
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or("")
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();

        if self.titles.contains(last_word.as_str()) {
            return true;
        }
        self.abbreviations.contains(last_word.as_str())
            && rest
                .trim_start()
                .chars()
                .next()
                .is_some_and(|c| c.is_lowercase() || c.is_ascii_digit())
    }
}

fn push_word<'a>(tokens: &mut Vec<&'a str>, word: &'a str) {
    match split_contraction(word) {
        Some((stem, clitic)) => {
            tokens.push(stem);
            tokens.push(clitic);
        }
        None => tokens.push(word),
    }
}

/// Split `word` into stem and clitic if it ends in an English contraction
fn split_contraction(word: &str) -> Option<(&str, &str)> {
    let (apostrophe, _) = word.char_indices().rev().find(|&(_, c)| is_apostrophe(c))?;
    let tail = &word[apostrophe..];
    let suffix = tail.chars().skip(1).collect::<String>().to_lowercase();

    // n't attaches to the preceding "n": "don't" -> "do" "n't"
    if suffix == "t" && apostrophe > 1 && word[..apostrophe].ends_with(['n', 'N']) {
        let split = apostrophe - 1;
        return Some((&word[..split], &word[split..]));
    }

    if apostrophe > 0 && CLITICS.contains(&suffix.as_str()) {
        return Some((&word[..apostrophe], tail));
    }

    None
}
