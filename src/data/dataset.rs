use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::domain::record::LABEL_COUNT;

/// One preprocessed training sample: a padded index sequence
/// and its six label flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentSample {
    pub input_ids: Vec<i32>,
    pub labels: [f32; LABEL_COUNT],
}

impl CommentSample {
    pub fn new(input_ids: Vec<i32>, labels: [f32; LABEL_COUNT]) -> Self {
        Self { input_ids, labels }
    }
}

pub struct CommentDataset {
    samples: Vec<CommentSample>,
}

impl CommentDataset {
    pub fn new(samples: Vec<CommentSample>) -> Self {
        Self { samples }
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

impl Dataset<CommentSample> for CommentDataset {
    fn get(&self, index: usize) -> Option<CommentSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
