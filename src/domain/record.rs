// ============================================================
// Layer 3 — CommentRecord Domain Type
// ============================================================
// A single comment with its six toxicity labels.
// The labels are independent binary flags, not mutually
// exclusive classes: a comment can be both `toxic` and
// `insult` at the same time (multi-label, not multi-class).

use serde::{Deserialize, Serialize};

/// The six label columns, in the order they appear in the
/// training table and in the submission file.
pub const LABELS: [&str; 6] = [
    "toxic",
    "severe_toxic",
    "obscene",
    "threat",
    "insult",
    "identity_hate",
];

/// Number of independent labels per comment.
pub const LABEL_COUNT: usize = LABELS.len();

/// A raw labelled comment from the training table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRecord {
    /// The comment text, exactly as read from the table
    pub text: String,

    /// One 0.0/1.0 flag per entry of [`LABELS`], same order
    pub labels: [f32; LABEL_COUNT],
}

impl CommentRecord {
    pub fn new(text: impl Into<String>, labels: [f32; LABEL_COUNT]) -> Self {
        Self {
            text: text.into(),
            labels,
        }
    }

    /// Returns true if every label flag is zero.
    pub fn is_clean(&self) -> bool {
        self.labels.iter().all(|&v| v == 0.0)
    }
}
