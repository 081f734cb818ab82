//! Top-N sentence selection
//!
//! Orders sentences by centrality and keeps the best `n`, carrying each
//! sentence's text and source into the output.

use crate::types::{RankedSentence, ReviewSentence};
use serde::{Deserialize, Serialize};

/// Output order of the selected sentences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionOrder {
    /// Most central sentence first
    #[default]
    Rank,
    /// Selected sentences in the order they appear in the corpus
    Corpus,
}

impl std::str::FromStr for SelectionOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "rank" | "score" => Ok(SelectionOrder::Rank),
            "corpus" | "document" | "reading" => Ok(SelectionOrder::Corpus),
            _ => Err(format!("unknown selection order: {value}")),
        }
    }
}

/// Picks the top-ranked sentences
#[derive(Debug, Clone, Default)]
pub struct SummarySelector {
    order: SelectionOrder,
}

impl SummarySelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order(mut self, order: SelectionOrder) -> Self {
        self.order = order;
        self
    }

    /// Select sentences by descending score
    ///
    /// `scores[i]` belongs to `sentences[i]`; a missing score counts as 0.
    /// Equal scores keep corpus order. `None` returns the whole corpus
    /// reordered; `Some(n)` returns at most `n` sentences.
    pub fn select(
        &self,
        sentences: &[ReviewSentence],
        scores: &[f64],
        n: Option<usize>,
    ) -> Vec<RankedSentence> {
        let limit = n.unwrap_or(sentences.len()).min(sentences.len());
        if limit == 0 {
            return Vec::new();
        }

        let score = |i: usize| scores.get(i).copied().unwrap_or(0.0);

        // Stable sort: ties stay in corpus order
        let mut ranked: Vec<usize> = (0..sentences.len()).collect();
        ranked.sort_by(|&a, &b| score(b).total_cmp(&score(a)));
        ranked.truncate(limit);

        if self.order == SelectionOrder::Corpus {
            ranked.sort_unstable();
        }

        ranked
            .into_iter()
            .map(|i| RankedSentence {
                raw_text: sentences[i].raw_text.clone(),
                source: sentences[i].source.clone(),
                score: score(i),
            })
            .collect()
    }
}
