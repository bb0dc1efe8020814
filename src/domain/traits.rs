// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// By programming against traits instead of concrete types,
// implementations can be swapped without changing the code
// that uses them:
//   - CsvCorpus implements RecordSource
//   - (future) a parquet or database source could as well
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use crate::domain::record::CommentRecord;

/// Any component that can load the comment corpus.
pub trait RecordSource {
    /// Load the labelled training records.
    fn load_labeled(&self) -> Result<Vec<CommentRecord>>;

    /// Load the unlabelled held-out texts, in file order.
    fn load_unlabeled(&self) -> Result<Vec<String>>;
}
