// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Full train + validation loop using Burn's DataLoader and Adam.
//
// Backend split:
//   - Training uses Autodiff<NdArray> for gradients
//   - model.valid() returns the model on plain NdArray, with
//     dropout inert, for the per-epoch validation pass
//
// After every epoch the model is run over the validation slice
// and the predictions are handed to the registered hooks
// (ROC-AUC logging, CSV metrics). A hook returning Stop ends
// training early; the artifact is saved either way.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::pipeline::PipelineConfig;
use crate::data::{
    batcher::CommentBatcher,
    dataset::{CommentDataset, CommentSample},
};
use crate::domain::hooks::{EpochEvaluation, EpochHook, HookSignal};
use crate::domain::record::LABEL_COUNT;
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::embedding_store::EmbeddingMatrix;
use crate::ml::model::{GruClassifier, GruClassifierConfig};
use crate::ml::predictor::predict_in_batches;

type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray>;

pub fn run_training(
    cfg: &PipelineConfig,
    model_cfg: &GruClassifierConfig,
    embeddings: &EmbeddingMatrix,
    train_samples: Vec<CommentSample>,
    val_samples: Vec<CommentSample>,
    ckpt: &CheckpointManager,
    hooks: &mut [Box<dyn EpochHook>],
) -> Result<()> {
    let device = burn::backend::ndarray::NdArrayDevice::default();
    TrainBackend::seed(cfg.backend_seed);

    // ── Build model ───────────────────────────────────────────────────────────
    let mut model: GruClassifier<TrainBackend> =
        model_cfg.init_with_embeddings(embeddings, &device);
    tracing::info!(
        "Model ready: {} embedding rows, hidden size {} per direction",
        model_cfg.vocab_size,
        model_cfg.hidden_size,
    );

    // ── Adam optimiser, default hyperparameters ───────────────────────────────
    let optim_cfg = AdamConfig::new();
    let mut optim = optim_cfg.init();

    // The validation slice is evaluated sample-wise after each epoch,
    // so keep its inputs and targets out of the loader.
    let val_inputs: Vec<Vec<i32>> = val_samples.iter().map(|s| s.input_ids.clone()).collect();
    let val_targets: Vec<[f32; LABEL_COUNT]> = val_samples.iter().map(|s| s.labels).collect();

    // ── Training data loader ──────────────────────────────────────────────────
    let train_dataset = CommentDataset::new(train_samples);
    tracing::info!(
        "Training on {} samples, validating on {}",
        train_dataset.sample_count(),
        val_inputs.len(),
    );

    let train_batcher = CommentBatcher::<TrainBackend>::new(device.clone());
    let train_loader = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(cfg.backend_seed)
        .num_workers(1)
        .build(train_dataset);

    // ── Epoch loop ────────────────────────────────────────────────────────────
    let mut stop_requested = false;
    for epoch in 1..=cfg.epochs {
        let mut loss_sum = 0.0f64;
        let mut batches = 0usize;
        let mut correct = 0usize;
        let mut total = 0usize;

        for batch in train_loader.iter() {
            let [batch_size, _] = batch.inputs.dims();

            let (loss, probs) = model.forward_loss(batch.inputs, batch.targets.clone());

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            loss_sum += loss_val;
            batches += 1;

            // Accuracy at threshold 0.5 over every label flag in the batch.
            let flags = probs.greater_elem(0.5).int();
            let batch_correct: i64 = flags
                .equal(batch.targets)
                .int()
                .sum()
                .into_scalar()
                .elem::<i64>();
            correct += batch_correct as usize;
            total += batch_size * LABEL_COUNT;

            // Backward pass + Adam update
            let grads = GradientsParams::from_grads(loss.backward(), &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let train_loss = if batches > 0 {
            loss_sum / batches as f64
        } else {
            f64::NAN
        };
        let train_accuracy = if total > 0 {
            correct as f64 / total as f64
        } else {
            0.0
        };

        println!(
            "Epoch {:>2}/{} | train_loss={:.4} | train_acc={:.1}%",
            epoch,
            cfg.epochs,
            train_loss,
            train_accuracy * 100.0,
        );

        // ── Validation phase + hooks ──────────────────────────────────────────
        // model.valid() → GruClassifier<NdArray>, dropout inert
        let model_valid = model.valid();
        let predictions =
            predict_in_batches(&model_valid, &val_inputs, cfg.batch_size, &device)?;

        let eval = EpochEvaluation {
            epoch,
            train_loss,
            train_accuracy,
            predictions,
            targets: val_targets.clone(),
        };

        for hook in hooks.iter_mut() {
            if hook.on_epoch_end(&eval)? == HookSignal::Stop {
                tracing::info!("Hook requested early stop after epoch {}", epoch);
                stop_requested = true;
            }
        }
        if stop_requested {
            break;
        }
    }

    // ── Persist the artifact ──────────────────────────────────────────────────
    ckpt.save_model(&model)?;
    ckpt.save_model_config(model_cfg)?;
    ckpt.save_run_config(cfg)?;
    tracing::info!("Training complete");

    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::evaluation::RocAucHook;

    /// Counts invocations so the test can see the trainer honour
    /// its stop signal.
    struct CountingHook {
        calls: std::rc::Rc<std::cell::Cell<usize>>,
        stop_after: usize,
    }

    impl EpochHook for CountingHook {
        fn on_epoch_end(&mut self, _eval: &EpochEvaluation) -> Result<HookSignal> {
            self.calls.set(self.calls.get() + 1);
            if self.calls.get() >= self.stop_after {
                Ok(HookSignal::Stop)
            } else {
                Ok(HookSignal::Continue)
            }
        }
    }

    fn tiny_samples() -> (Vec<CommentSample>, Vec<CommentSample>) {
        let mut toxic = [0.0f32; LABEL_COUNT];
        toxic[0] = 1.0;
        let train = vec![
            CommentSample::new(vec![0, 1, 2, 3], [0.0; LABEL_COUNT]),
            CommentSample::new(vec![1, 2, 3, 4], toxic),
            CommentSample::new(vec![0, 0, 1, 2], [0.0; LABEL_COUNT]),
            CommentSample::new(vec![2, 3, 4, 5], toxic),
        ];
        // One positive and one negative per label would be required for
        // the AUC hook; the counting hook doesn't care.
        let val = vec![
            CommentSample::new(vec![0, 1, 2, 3], [0.0; LABEL_COUNT]),
            CommentSample::new(vec![1, 2, 3, 4], toxic),
        ];
        (train, val)
    }

    fn tiny_config(dir: &std::path::Path) -> (PipelineConfig, GruClassifierConfig) {
        let pipeline_cfg = PipelineConfig {
            artifact_dir: dir.display().to_string(),
            epochs: 3,
            batch_size: 2,
            max_features: 10,
            maxlen: 4,
            embed_size: 8,
            hidden_size: 4,
            ..PipelineConfig::default()
        };
        let model_cfg = GruClassifierConfig::new(10, 8, 4);
        (pipeline_cfg, model_cfg)
    }

    fn zero_matrix(rows: usize, cols: usize) -> EmbeddingMatrix {
        EmbeddingMatrix::build(
            &std::collections::HashMap::new(),
            &crate::data::vocab::Vocabulary::fit(["a b c d e f g h i"].iter().copied()),
            rows,
            cols,
        )
        .unwrap()
    }

    #[test]
    fn test_stop_signal_ends_training_early_and_still_saves() {
        let dir = tempfile::tempdir().unwrap();
        let (pipeline_cfg, model_cfg) = tiny_config(dir.path());
        let ckpt = CheckpointManager::new(dir.path());
        let (train, val) = tiny_samples();

        let calls = std::rc::Rc::new(std::cell::Cell::new(0));
        let mut hooks: Vec<Box<dyn EpochHook>> = vec![Box::new(CountingHook {
            calls: calls.clone(),
            stop_after: 2,
        })];

        let matrix = zero_matrix(10, 8);
        run_training(
            &pipeline_cfg,
            &model_cfg,
            &matrix,
            train,
            val,
            &ckpt,
            &mut hooks,
        )
        .unwrap();

        // Stopped after epoch 2 of 3, artifact still written.
        assert_eq!(calls.get(), 2);
        assert!(ckpt.artifact_exists());
    }

    #[test]
    fn test_degenerate_validation_slice_aborts_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let (pipeline_cfg, model_cfg) = tiny_config(dir.path());
        let ckpt = CheckpointManager::new(dir.path());
        let (train, _) = tiny_samples();

        // Every validation label all-zero: AUC is undefined.
        let val = vec![
            CommentSample::new(vec![0, 1, 2, 3], [0.0; LABEL_COUNT]),
            CommentSample::new(vec![1, 2, 3, 4], [0.0; LABEL_COUNT]),
        ];
        let mut hooks: Vec<Box<dyn EpochHook>> = vec![Box::new(RocAucHook::new(1))];

        let matrix = zero_matrix(10, 8);
        let result = run_training(
            &pipeline_cfg,
            &model_cfg,
            &matrix,
            train,
            val,
            &ckpt,
            &mut hooks,
        );
        assert!(result.is_err());
    }
}
