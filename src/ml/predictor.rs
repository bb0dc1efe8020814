// ============================================================
// Layer 5 — Predictor
// ============================================================
// Rebuilds the model from the saved architecture config, loads
// the trained weights, and runs batched inference over padded
// test sequences. Output order matches input order exactly,
// which is what ties the predictions back to the submission
// template rows.

use anyhow::Result;
use burn::prelude::*;

use crate::domain::record::LABEL_COUNT;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::GruClassifier;

type InferBackend = burn::backend::NdArray;

pub struct Predictor {
    model: GruClassifier<InferBackend>,
    device: burn::backend::ndarray::NdArrayDevice,
}

impl Predictor {
    pub fn from_checkpoint(ckpt: &CheckpointManager) -> Result<Self> {
        let device = burn::backend::ndarray::NdArrayDevice::default();
        let model_cfg = ckpt.load_model_config()?;
        let model: GruClassifier<InferBackend> = model_cfg.init(&device);
        let model = ckpt.load_model(model, &device)?;
        tracing::info!("Model loaded from artifact");
        Ok(Self { model, device })
    }

    /// Batched inference: one probability row per input sequence.
    pub fn predict(
        &self,
        sequences: &[Vec<i32>],
        batch_size: usize,
    ) -> Result<Vec<[f32; LABEL_COUNT]>> {
        predict_in_batches(&self.model, sequences, batch_size, &self.device)
    }
}

/// Run the model over `sequences` in fixed-size batches.
/// Shared between the predictor and the trainer's per-epoch
/// validation pass.
pub fn predict_in_batches<B: Backend>(
    model: &GruClassifier<B>,
    sequences: &[Vec<i32>],
    batch_size: usize,
    device: &B::Device,
) -> Result<Vec<[f32; LABEL_COUNT]>> {
    let mut predictions = Vec::with_capacity(sequences.len());

    for chunk in sequences.chunks(batch_size.max(1)) {
        let rows = chunk.len();
        // All sequences are pre-padded to the same length
        let seq_len = chunk[0].len();

        let flat: Vec<i32> = chunk.iter().flat_map(|s| s.iter().copied()).collect();
        let inputs =
            Tensor::<B, 1, Int>::from_ints(flat.as_slice(), device).reshape([rows, seq_len]);

        let probs = model.forward(inputs);
        let values: Vec<f32> = probs.into_data().convert::<f32>().value;

        for row in values.chunks(LABEL_COUNT) {
            let mut labels = [0.0f32; LABEL_COUNT];
            labels.copy_from_slice(row);
            predictions.push(labels);
        }
    }

    Ok(predictions)
}
