// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores the model artifact using Burn's
// CompactRecorder (MessagePack + gzip).
//
// Files in the artifact directory:
//   gru_classifier.mpk.gz — all learned parameters
//   model_config.json     — architecture hyperparameters
//
// The presence of the weights file is the pipeline's only
// skip-training signal: if it exists, training is skipped and
// the artifact is loaded as-is. There is no staleness check
// against the current data or vocabulary.

use anyhow::{Context, Result};
use burn::{
    config::Config,
    prelude::*,
    record::{CompactRecorder, Recorder},
    tensor::backend::AutodiffBackend,
};
use std::{fs, path::PathBuf};

use crate::application::pipeline::PipelineConfig;
use crate::ml::model::{GruClassifier, GruClassifierConfig};

const WEIGHTS_STEM: &str = "gru_classifier";
const CONFIG_FILE: &str = "model_config.json";
const RUN_CONFIG_FILE: &str = "run_config.json";

/// Manages the model artifact in a single directory.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Create a new CheckpointManager, creating the directory
    /// if it doesn't already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    /// The file the recorder writes; its existence is the sole
    /// control signal for skip-training-vs-train.
    pub fn weights_path(&self) -> PathBuf {
        self.dir.join(format!("{WEIGHTS_STEM}.mpk.gz"))
    }

    pub fn artifact_exists(&self) -> bool {
        self.weights_path().exists()
    }

    /// Save trained model weights.
    pub fn save_model<B: AutodiffBackend>(&self, model: &GruClassifier<B>) -> Result<()> {
        let path = self.dir.join(WEIGHTS_STEM);

        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| format!("Failed to save model to '{}'", path.display()))?;

        tracing::info!("Saved model artifact to '{}'", self.weights_path().display());
        Ok(())
    }

    /// Load saved weights into a freshly built model.
    /// The model must have the architecture recorded in the
    /// artifact or loading fails.
    pub fn load_model<B: Backend>(
        &self,
        model: GruClassifier<B>,
        device: &B::Device,
    ) -> Result<GruClassifier<B>> {
        let path = self.dir.join(WEIGHTS_STEM);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!(
                    "Cannot load model artifact '{}'. Have you trained the model first?",
                    self.weights_path().display()
                )
            })?;

        Ok(model.load_record(record))
    }

    /// Save the model architecture config next to the weights so
    /// the predictor can rebuild the exact same model.
    pub fn save_model_config(&self, cfg: &GruClassifierConfig) -> Result<()> {
        let path = self.dir.join(CONFIG_FILE);
        cfg.save(&path)
            .with_context(|| format!("Cannot write model config to '{}'", path.display()))?;
        tracing::debug!("Saved model config to '{}'", path.display());
        Ok(())
    }

    /// Save the full pipeline configuration beside the weights,
    /// recording what produced this artifact. Never read back by
    /// the pipeline itself; the artifact's presence alone decides
    /// whether training is skipped.
    pub fn save_run_config(&self, cfg: &PipelineConfig) -> Result<()> {
        let path = self.dir.join(RUN_CONFIG_FILE);
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write run config to '{}'", path.display()))?;
        Ok(())
    }

    pub fn load_model_config(&self) -> Result<GruClassifierConfig> {
        let path = self.dir.join(CONFIG_FILE);
        GruClassifierConfig::load(&path).map_err(|e| {
            anyhow::anyhow!(
                "Cannot read model config from '{}': {}. \
                 The artifact directory is incomplete.",
                path.display(),
                e
            )
        })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_exists_checks_the_weights_file() {
        let dir = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path());
        assert!(!ckpt.artifact_exists());

        // An empty file at the expected path is enough to flip the signal.
        std::fs::File::create(ckpt.weights_path()).unwrap();
        assert!(ckpt.artifact_exists());
    }

    #[test]
    fn test_model_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path());

        let cfg = GruClassifierConfig::new(10, 8, 4);
        ckpt.save_model_config(&cfg).unwrap();

        let loaded = ckpt.load_model_config().unwrap();
        assert_eq!(loaded.vocab_size, 10);
        assert_eq!(loaded.embed_size, 8);
        assert_eq!(loaded.hidden_size, 4);
    }
}
