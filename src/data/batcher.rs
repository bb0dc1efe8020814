// ============================================================
// Layer 4 — Comment Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec of
// CommentSamples into tensor batches.
//
// All sequences are already padded to the same length, so
// batching is a flatten-and-reshape:
//   [s1_t1, ..., s1_tL, s2_t1, ..., sN_tL] → [N, L]
// Labels are stacked the same way into an [N, 6] target
// tensor of 0/1 integers for the binary cross-entropy loss.
//
// Reference: Burn Book §4 (Batcher)

use burn::{data::dataloader::batcher::Batcher, prelude::*};

use crate::data::dataset::CommentSample;
use crate::domain::record::LABEL_COUNT;

/// A batch of comment samples ready for the model forward pass.
#[derive(Debug, Clone)]
pub struct CommentBatch<B: Backend> {
    /// Token index sequences — shape: [batch_size, maxlen]
    pub inputs: Tensor<B, 2, Int>,

    /// Label flags — shape: [batch_size, 6], values 0 or 1
    pub targets: Tensor<B, 2, Int>,
}

#[derive(Clone, Debug)]
pub struct CommentBatcher<B: Backend> {
    device: B::Device,
}

impl<B: Backend> CommentBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<CommentSample, CommentBatch<B>> for CommentBatcher<B> {
    fn batch(&self, items: Vec<CommentSample>) -> CommentBatch<B> {
        let batch_size = items.len();
        // All sequences have the same length (pre-padded)
        let seq_len = items[0].input_ids.len();

        let input_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.input_ids.iter().copied())
            .collect();

        let target_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.labels.iter().map(|&v| v as i32))
            .collect();

        let inputs = Tensor::<B, 1, Int>::from_ints(input_flat.as_slice(), &self.device)
            .reshape([batch_size, seq_len]);

        let targets = Tensor::<B, 1, Int>::from_ints(target_flat.as_slice(), &self.device)
            .reshape([batch_size, LABEL_COUNT]);

        CommentBatch { inputs, targets }
    }
}
