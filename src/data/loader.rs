// ============================================================
// Layer 4 — CSV Corpus Loader
// ============================================================
// Reads the two input tables:
//   - train.csv: comment text plus six 0/1 label columns
//   - test.csv:  comment text only
//
// Columns are matched by header name via serde, so extra
// columns (e.g. the `id` column) are ignored on read.
// A missing input file is a hard error: this is a one-shot
// offline batch job and there is nothing sensible to fall
// back to.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::record::{CommentRecord, LABEL_COUNT};
use crate::domain::traits::RecordSource;

/// One row of the training table, as serde sees it.
#[derive(Debug, Deserialize)]
struct TrainRow {
    comment_text: String,
    toxic: u8,
    severe_toxic: u8,
    obscene: u8,
    threat: u8,
    insult: u8,
    identity_hate: u8,
}

impl TrainRow {
    fn labels(&self) -> [f32; LABEL_COUNT] {
        [
            self.toxic as f32,
            self.severe_toxic as f32,
            self.obscene as f32,
            self.threat as f32,
            self.insult as f32,
            self.identity_hate as f32,
        ]
    }
}

/// One row of the test table.
#[derive(Debug, Deserialize)]
struct TestRow {
    comment_text: String,
}

/// Loads the labelled and unlabelled tables from fixed paths.
/// Implements the RecordSource trait from Layer 3.
pub struct CsvCorpus {
    train_path: PathBuf,
    test_path: PathBuf,
}

impl CsvCorpus {
    pub fn new(train_path: impl Into<PathBuf>, test_path: impl Into<PathBuf>) -> Self {
        Self {
            train_path: train_path.into(),
            test_path: test_path.into(),
        }
    }
}

impl RecordSource for CsvCorpus {
    fn load_labeled(&self) -> Result<Vec<CommentRecord>> {
        let mut reader = csv::Reader::from_path(&self.train_path)
            .with_context(|| format!("Cannot read '{}'", self.train_path.display()))?;

        let mut records = Vec::new();
        for row in reader.deserialize::<TrainRow>() {
            let row = row.with_context(|| {
                format!("Malformed row in '{}'", self.train_path.display())
            })?;
            let labels = row.labels();
            records.push(CommentRecord::new(row.comment_text, labels));
        }

        tracing::info!("Loaded {} training records", records.len());
        Ok(records)
    }

    fn load_unlabeled(&self) -> Result<Vec<String>> {
        let mut reader = csv::Reader::from_path(&self.test_path)
            .with_context(|| format!("Cannot read '{}'", self.test_path.display()))?;

        let mut texts = Vec::new();
        for row in reader.deserialize::<TestRow>() {
            let row = row.with_context(|| {
                format!("Malformed row in '{}'", self.test_path.display())
            })?;
            texts.push(row.comment_text);
        }

        tracing::info!("Loaded {} test records", texts.len());
        Ok(texts)
    }
}
