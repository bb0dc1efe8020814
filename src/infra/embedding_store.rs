// ============================================================
// Layer 6 — Embedding Store
// ============================================================
// Parses a pretrained word-vector file and builds the dense
// matrix the embedding layer is initialised from.
//
// File format: one entry per line, whitespace-separated:
//   word v1 v2 ... v300
//
// Parsing is strict in the same way the rest of the pipeline
// is: a field that does not parse as a float propagates as an
// error and aborts the run. There is no recovery path for a
// corrupt embedding file.

use anyhow::{bail, Context, Result};
use burn::prelude::*;
use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::PathBuf,
};

use crate::data::vocab::Vocabulary;

/// Reads the pretrained vector file into a word → vector map.
pub struct EmbeddingStore {
    path: PathBuf,
}

impl EmbeddingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse the whole file. Every line becomes one entry; the
    /// first whitespace-separated field is the word, the rest
    /// must parse as floats.
    pub fn load_index(&self) -> Result<HashMap<String, Vec<f32>>> {
        let file = File::open(&self.path)
            .with_context(|| format!("Cannot read '{}'", self.path.display()))?;
        let reader = BufReader::new(file);

        let mut index = HashMap::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line
                .with_context(|| format!("I/O error in '{}'", self.path.display()))?;
            let mut fields = line.split_whitespace();

            let Some(word) = fields.next() else {
                continue; // blank line
            };

            let vector = fields
                .map(|v| v.parse::<f32>())
                .collect::<Result<Vec<f32>, _>>()
                .with_context(|| {
                    format!(
                        "Malformed vector for '{}' at line {} of '{}'",
                        word,
                        line_no + 1,
                        self.path.display()
                    )
                })?;

            index.insert(word.to_string(), vector);
        }

        tracing::info!(
            "Loaded {} pretrained vectors from '{}'",
            index.len(),
            self.path.display()
        );
        Ok(index)
    }
}

/// Dense matrix aligned to the vocabulary index: row i holds the
/// pretrained vector for the word with index i. Built once,
/// immutable afterward.
pub struct EmbeddingMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl EmbeddingMatrix {
    /// Build the matrix from the pretrained index and the fitted
    /// vocabulary. Rows are capped at `max_features`; row 0 (the
    /// padding index) and rows for words without a pretrained
    /// vector stay zero.
    pub fn build(
        pretrained: &HashMap<String, Vec<f32>>,
        vocab: &Vocabulary,
        max_features: usize,
        embed_size: usize,
    ) -> Result<Self> {
        let rows = max_features.min(vocab.len() + 1);
        let mut data = vec![0.0f32; rows * embed_size];

        for (word, i) in vocab.entries() {
            if i >= rows {
                continue;
            }
            let Some(vector) = pretrained.get(word) else {
                continue;
            };
            if vector.len() != embed_size {
                bail!(
                    "Pretrained vector for '{}' has {} dimensions, expected {}",
                    word,
                    vector.len(),
                    embed_size,
                );
            }
            data[i * embed_size..(i + 1) * embed_size].copy_from_slice(vector);
        }

        Ok(Self {
            rows,
            cols: embed_size,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Upload the matrix as a [rows, cols] tensor.
    pub fn to_tensor<B: Backend>(&self, device: &B::Device) -> Tensor<B, 2> {
        Tensor::<B, 1>::from_floats(self.data.as_slice(), device)
            .reshape([self.rows, self.cols])
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_vec_file(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("vectors.vec");
        let mut f = File::create(&path).unwrap();
        write!(f, "{}", content).unwrap();
        path
    }

    #[test]
    fn test_parses_word_and_vector() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_vec_file(&dir, "hello 0.1 0.2 0.3\nworld 1.0 2.0 3.0\n");

        let index = EmbeddingStore::new(path).load_index().unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index["hello"], vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_malformed_float_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_vec_file(&dir, "hello 0.1 oops 0.3\n");
        assert!(EmbeddingStore::new(path).load_index().is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(EmbeddingStore::new("no/such/file.vec").load_index().is_err());
    }

    #[test]
    fn test_unknown_words_stay_zero_rows() {
        let mut pretrained = HashMap::new();
        pretrained.insert("cat".to_string(), vec![1.0; 300]);

        // "the"=1, "cat"=2, "sat"=3
        let vocab = Vocabulary::fit(["the the cat cat sat"].iter().copied());
        let matrix = EmbeddingMatrix::build(&pretrained, &vocab, 30000, 300).unwrap();

        assert_eq!(matrix.cols(), 300);
        // Padding row and words absent from the pretrained file are all-zero.
        assert!(matrix.row(0).iter().all(|&v| v == 0.0));
        assert!(matrix.row(1).iter().all(|&v| v == 0.0));
        assert!(matrix.row(3).iter().all(|&v| v == 0.0));
        // The known word's row carries its pretrained signal.
        assert!(matrix.row(2).iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_rows_are_capped_at_max_features() {
        let pretrained = HashMap::new();
        let vocab = Vocabulary::fit(["a b c d e f g h i j k l"].iter().copied());
        let matrix = EmbeddingMatrix::build(&pretrained, &vocab, 10, 300).unwrap();
        assert_eq!(matrix.rows(), 10);
    }

    #[test]
    fn test_dimension_mismatch_is_an_error() {
        let mut pretrained = HashMap::new();
        pretrained.insert("cat".to_string(), vec![1.0, 2.0]);
        let vocab = Vocabulary::fit(["cat"].iter().copied());
        assert!(EmbeddingMatrix::build(&pretrained, &vocab, 100, 300).is_err());
    }
}
