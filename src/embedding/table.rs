//! Pretrained word vector table
//!
//! Loads GloVe-style text resources (`word v1 v2 .. vD`, one record per
//! line) into an immutable in-memory map. A table is built once and then
//! shared read-only, typically behind an `Arc`.

use crate::errors::VectorLoadError;
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Mapping from word to a fixed-dimension vector
///
/// Lookups of unknown words return the zero vector; they never fail.
#[derive(Debug, Clone)]
pub struct WordVectorTable {
    vectors: FxHashMap<String, Vec<f32>>,
    dimension: usize,
    zero: Vec<f32>,
}

impl WordVectorTable {
    /// Load a table from a file, inferring the dimension from the first record
    pub fn load(path: impl AsRef<Path>) -> Result<Self, VectorLoadError> {
        Self::load_with_dimension(path, None)
    }

    /// Load a table from a file, requiring every vector to have `expected`
    /// values when given
    ///
    /// The file is closed before this returns, on success and on failure.
    pub fn load_with_dimension(
        path: impl AsRef<Path>,
        expected: Option<usize>,
    ) -> Result<Self, VectorLoadError> {
        let path = path.as_ref();
        let started = Instant::now();

        let file = File::open(path).map_err(|source| VectorLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(BufReader::new(file), expected)?;

        info!(
            path = %path.display(),
            words = table.len(),
            dimension = table.dimension(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "loaded word vectors"
        );
        Ok(table)
    }

    /// Parse a table from any buffered reader
    pub fn from_reader<R: BufRead>(
        reader: R,
        expected: Option<usize>,
    ) -> Result<Self, VectorLoadError> {
        let mut vectors: FxHashMap<String, Vec<f32>> = FxHashMap::default();
        let mut dimension = expected;

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.map_err(|source| VectorLoadError::Read {
                line: line_no,
                source,
            })?;

            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else {
                continue; // blank line
            };

            let values = fields
                .enumerate()
                .map(|(field_idx, raw)| {
                    raw.parse::<f32>()
                        .map_err(|_| VectorLoadError::InvalidValue {
                            line: line_no,
                            field: field_idx + 2,
                            value: raw.to_string(),
                        })
                })
                .collect::<Result<Vec<f32>, _>>()?;

            if values.is_empty() {
                return Err(VectorLoadError::MissingValues { line: line_no });
            }

            let expected = *dimension.get_or_insert(values.len());
            if values.len() != expected {
                return Err(VectorLoadError::DimensionMismatch {
                    line: line_no,
                    expected,
                    found: values.len(),
                });
            }

            vectors.insert(word.to_string(), values);
        }

        let Some(dimension) = dimension.filter(|_| !vectors.is_empty()) else {
            return Err(VectorLoadError::Empty);
        };

        debug!(words = vectors.len(), dimension, "parsed word vector records");
        Ok(Self {
            vectors,
            dimension,
            zero: vec![0.0; dimension],
        })
    }

    /// Build a table from in-memory entries
    ///
    /// Entries are validated like file records; the "line" in errors is the
    /// 1-based entry position.
    pub fn from_entries<I, W>(dimension: usize, entries: I) -> Result<Self, VectorLoadError>
    where
        I: IntoIterator<Item = (W, Vec<f32>)>,
        W: Into<String>,
    {
        let mut vectors = FxHashMap::default();
        for (idx, (word, values)) in entries.into_iter().enumerate() {
            if values.len() != dimension {
                return Err(VectorLoadError::DimensionMismatch {
                    line: idx + 1,
                    expected: dimension,
                    found: values.len(),
                });
            }
            vectors.insert(word.into(), values);
        }

        if dimension == 0 || vectors.is_empty() {
            return Err(VectorLoadError::Empty);
        }

        Ok(Self {
            vectors,
            dimension,
            zero: vec![0.0; dimension],
        })
    }

    /// Vector for `word`, or the zero vector if the word is unknown
    ///
    /// Keys are matched exactly; callers query in lowercase.
    pub fn lookup(&self, word: &str) -> &[f32] {
        self.get(word).unwrap_or(self.zero.as_slice())
    }

    /// Vector for `word` if present
    pub fn get(&self, word: &str) -> Option<&[f32]> {
        self.vectors.get(word).map(Vec::as_slice)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.vectors.contains_key(word)
    }

    /// Dimension D shared by every vector
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of words in the table
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}
