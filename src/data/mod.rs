// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from raw CSV tables to GPU-ready tensor batches.
//
// The pipeline flows in this order:
//
//   train.csv / test.csv
//       │
//       ▼
//   CsvCorpus         → reads rows, extracts text and labels
//       │
//       ▼
//   WordTokenizer     → splits words and punctuation, rejoins
//       │
//       ▼
//   Vocabulary        → frequency-ranked word index (train+test)
//       │
//       ▼
//   sequence          → word indices, padded to a fixed length
//       │
//       ▼
//   CommentDataset    → implements Burn's Dataset trait
//       │
//       ▼
//   CommentBatcher    → stacks samples into tensor batches
//       │
//       ▼
//   DataLoader        → feeds batches to the training loop
//
// Each module is responsible for exactly one step.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Loads the train/test CSV tables
pub mod loader;

/// Splits raw text into word and punctuation tokens
pub mod tokenizer;

/// Frequency-ranked word index over the combined corpus
pub mod vocab;

/// Index sequences and fixed-length padding
pub mod sequence;

/// Shuffles and splits samples into train/validation sets
pub mod splitter;

/// Implements Burn's Dataset trait for comment samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Reads the submission template and writes predictions
pub mod submission;
