// ============================================================
// Layer 2 — Pipeline Use Case
// ============================================================
// Orchestrates the full batch job in order:
//
//   Step 1: Load train/test tables        (Layer 4 - data)
//   Step 2: Tokenize and normalise text   (Layer 4 - data)
//   Step 3: Fit vocabulary on train+test  (Layer 4 - data)
//   Step 4: Index and pad sequences       (Layer 4 - data)
//   Step 5: Load pretrained embeddings    (Layer 6 - infra)
//   Step 6: Train model or load artifact  (Layer 5 - ml)
//   Step 7: Predict on the test set       (Layer 5 - ml)
//   Step 8: Write the submission file     (Layer 4 - data)
//
// The train-or-load decision at Step 6 is driven solely by the
// presence of the artifact file: if it exists and force_retrain
// is off, training is skipped and the artifact is loaded as-is,
// with no check that it matches the current data or vocabulary.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::data::{
    dataset::CommentSample,
    loader::CsvCorpus,
    sequence::{pad_sequences, texts_to_sequences},
    splitter::split_train_val,
    submission::{load_template_ids, write_submission},
    tokenizer::WordTokenizer,
    vocab::Vocabulary,
};
use crate::domain::hooks::EpochHook;
use crate::domain::traits::RecordSource;
use crate::infra::{
    checkpoint::CheckpointManager,
    embedding_store::{EmbeddingMatrix, EmbeddingStore},
    metrics::MetricsHook,
};
use crate::ml::{
    evaluation::RocAucHook, model::GruClassifierConfig, predictor::Predictor,
    trainer::run_training,
};

// ─── Pipeline Configuration ──────────────────────────────────────────────────
// Every knob of the batch job in one serialisable struct. The
// input paths are fixed relative paths: this is a one-shot
// experiment, not a general-purpose tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub train_file: String,
    pub test_file: String,
    pub embedding_file: String,
    pub submission_template: String,
    pub output_file: String,
    pub artifact_dir: String,

    pub max_features: usize,
    pub maxlen: usize,
    pub embed_size: usize,
    pub hidden_size: usize,
    pub spatial_dropout: f64,
    pub input_dropout: f64,

    pub batch_size: usize,
    pub epochs: usize,
    pub lr: f64,
    pub train_fraction: f64,
    pub eval_interval: usize,
    pub predict_batch_size: usize,

    /// Seed for the train/validation shuffle
    pub split_seed: u64,
    /// Seed for weight init, dropout masks, and batch shuffling
    pub backend_seed: u64,
    /// Upper bound on backend-level parallelism
    pub backend_threads: usize,

    /// Train even when an artifact already exists
    pub force_retrain: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            train_file: "data/train.csv".to_string(),
            test_file: "data/test.csv".to_string(),
            embedding_file: "data/crawl-300d-2M.vec".to_string(),
            submission_template: "data/sample_submission.csv".to_string(),
            output_file: "data/submission.csv".to_string(),
            artifact_dir: "data/model".to_string(),

            max_features: 30_000,
            maxlen: 100,
            embed_size: 300,
            hidden_size: 80,
            spatial_dropout: 0.4,
            input_dropout: 0.3,

            batch_size: 32,
            epochs: 2,
            lr: 1e-3,
            train_fraction: 0.95,
            eval_interval: 1,
            predict_batch_size: 1024,

            split_seed: 233,
            backend_seed: 42,
            backend_threads: 3,

            force_retrain: false,
        }
    }
}

// ─── Model Source ─────────────────────────────────────────────────────────────
/// Whether Step 6 trains a fresh model or deserialises the
/// existing artifact. Kept as a standalone decision so the
/// skip-training branch can be tested without touching tensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSource {
    Train,
    LoadArtifact,
}

impl ModelSource {
    pub fn resolve(artifact_exists: bool, force_retrain: bool) -> Self {
        if artifact_exists && !force_retrain {
            ModelSource::LoadArtifact
        } else {
            ModelSource::Train
        }
    }
}

// ─── PipelineUseCase ──────────────────────────────────────────────────────────
pub struct PipelineUseCase {
    config: PipelineConfig,
}

impl PipelineUseCase {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Execute the full batch job end to end.
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // Backend thread cap, applied once for the whole process.
        rayon::ThreadPoolBuilder::new()
            .num_threads(cfg.backend_threads)
            .build_global()
            .ok();

        // ── Step 1: Load the input tables ────────────────────────────────────
        tracing::info!("Starting extraction");
        let corpus = CsvCorpus::new(&cfg.train_file, &cfg.test_file);
        let train_records = corpus.load_labeled()?;
        let test_texts = corpus.load_unlabeled()?;
        tracing::debug!(
            "{} of {} training comments carry no labels",
            train_records.iter().filter(|r| r.is_clean()).count(),
            train_records.len(),
        );

        // ── Step 2: Tokenize and normalise ───────────────────────────────────
        let tokenizer = WordTokenizer::new();
        tracing::info!("Extracting train dataset content");
        let train_texts: Vec<String> = train_records
            .iter()
            .map(|r| tokenizer.normalize(&r.text))
            .collect();
        tracing::info!("Extracting test dataset content");
        let test_texts: Vec<String> = test_texts
            .iter()
            .map(|t| tokenizer.normalize(t))
            .collect();
        tracing::info!("Extraction finished");

        // ── Step 3: Fit vocabulary over train+test combined ──────────────────
        let vocab = Vocabulary::fit(
            train_texts
                .iter()
                .map(|s| s.as_str())
                .chain(test_texts.iter().map(|s| s.as_str())),
        );
        tracing::info!("Vocabulary fitted: {} distinct words", vocab.len());

        // ── Step 4: Index sequences, padded to maxlen ────────────────────────
        let x_train = pad_sequences(
            &texts_to_sequences(&train_texts, &vocab, cfg.max_features),
            cfg.maxlen,
        );
        let x_test = pad_sequences(
            &texts_to_sequences(&test_texts, &vocab, cfg.max_features),
            cfg.maxlen,
        );

        // ── Step 5: Pretrained embedding matrix ──────────────────────────────
        tracing::info!("Loading word embeddings");
        let pretrained = EmbeddingStore::new(&cfg.embedding_file).load_index()?;
        let matrix =
            EmbeddingMatrix::build(&pretrained, &vocab, cfg.max_features, cfg.embed_size)?;

        let model_cfg = GruClassifierConfig::new(matrix.rows(), cfg.embed_size, cfg.hidden_size)
            .with_spatial_dropout(cfg.spatial_dropout)
            .with_input_dropout(cfg.input_dropout);
        let ckpt = CheckpointManager::new(&cfg.artifact_dir);

        // ── Step 6: Train, or load the existing artifact ─────────────────────
        match ModelSource::resolve(ckpt.artifact_exists(), cfg.force_retrain) {
            ModelSource::Train => {
                tracing::info!("Training model");
                let samples: Vec<CommentSample> = x_train
                    .into_iter()
                    .zip(train_records.iter())
                    .map(|(seq, r)| CommentSample::new(seq, r.labels))
                    .collect();
                let (train_samples, val_samples) =
                    split_train_val(samples, cfg.train_fraction, cfg.split_seed);
                tracing::info!(
                    "Split: {} train, {} validation",
                    train_samples.len(),
                    val_samples.len(),
                );

                let mut hooks: Vec<Box<dyn EpochHook>> = vec![
                    Box::new(RocAucHook::new(cfg.eval_interval)),
                    Box::new(MetricsHook::new(&cfg.artifact_dir)?),
                ];
                run_training(
                    cfg,
                    &model_cfg,
                    &matrix,
                    train_samples,
                    val_samples,
                    &ckpt,
                    &mut hooks,
                )?;
            }
            ModelSource::LoadArtifact => {
                tracing::info!("Loading model");
            }
        }

        // ── Step 7: Predict on the test set ──────────────────────────────────
        tracing::info!("Predicting on test set");
        let predictor = Predictor::from_checkpoint(&ckpt)?;
        let predictions = predictor.predict(&x_test, cfg.predict_batch_size)?;

        // ── Step 8: Write the submission file ────────────────────────────────
        tracing::info!("Printing to output file");
        let ids = load_template_ids(Path::new(&cfg.submission_template))?;
        write_submission(Path::new(&cfg.output_file), &ids, &predictions)?;

        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_source_resolution() {
        assert_eq!(ModelSource::resolve(false, false), ModelSource::Train);
        assert_eq!(ModelSource::resolve(false, true), ModelSource::Train);
        assert_eq!(ModelSource::resolve(true, true), ModelSource::Train);
        // Only an existing artifact with the toggle off skips training.
        assert_eq!(
            ModelSource::resolve(true, false),
            ModelSource::LoadArtifact
        );
    }

    #[test]
    fn test_tiny_corpus_preprocessing_scenario() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let train_path = dir.path().join("train.csv");
        let mut f = std::fs::File::create(&train_path).unwrap();
        writeln!(f, "id,comment_text,toxic,severe_toxic,obscene,threat,insult,identity_hate")
            .unwrap();
        writeln!(f, "a1,what a lovely day,0,0,0,0,0,0").unwrap();
        writeln!(f, "a2,you lovely idiot,1,0,0,0,0,0").unwrap();

        let test_path = dir.path().join("test.csv");
        let mut f = std::fs::File::create(&test_path).unwrap();
        writeln!(f, "id,comment_text").unwrap();
        writeln!(f, "b1,lovely weather").unwrap();

        // One pretrained entry covering a word shared by all rows.
        let emb_path = dir.path().join("vectors.vec");
        let mut f = std::fs::File::create(&emb_path).unwrap();
        let floats = vec!["0.25"; 300].join(" ");
        writeln!(f, "lovely {}", floats).unwrap();

        let max_features = 10;
        let maxlen = 4;

        let corpus = CsvCorpus::new(&train_path, &test_path);
        let train_records = corpus.load_labeled().unwrap();
        let test_texts = corpus.load_unlabeled().unwrap();

        let tokenizer = WordTokenizer::new();
        let train_texts: Vec<String> = train_records
            .iter()
            .map(|r| tokenizer.normalize(&r.text))
            .collect();
        let test_texts: Vec<String> = test_texts
            .iter()
            .map(|t| tokenizer.normalize(t))
            .collect();

        let vocab = Vocabulary::fit(
            train_texts
                .iter()
                .map(|s| s.as_str())
                .chain(test_texts.iter().map(|s| s.as_str())),
        );

        let x_train = pad_sequences(
            &texts_to_sequences(&train_texts, &vocab, max_features),
            maxlen,
        );
        assert_eq!(x_train.len(), 2);
        assert!(x_train.iter().all(|s| s.len() == maxlen));

        let pretrained = EmbeddingStore::new(&emb_path).load_index().unwrap();
        let matrix = EmbeddingMatrix::build(&pretrained, &vocab, max_features, 300).unwrap();
        assert!(matrix.rows() <= max_features);
        assert_eq!(matrix.cols(), 300);
        // The shared word's row carries its pretrained signal.
        let lovely_idx = vocab.index_of("lovely").unwrap();
        assert!(matrix.row(lovely_idx).iter().all(|&v| (v - 0.25).abs() < 1e-6));

        // Pre-creating an empty file at the expected artifact path is
        // enough to take the skip-training branch.
        let ckpt = CheckpointManager::new(dir.path().join("model"));
        std::fs::File::create(ckpt.weights_path()).unwrap();
        assert_eq!(
            ModelSource::resolve(ckpt.artifact_exists(), false),
            ModelSource::LoadArtifact
        );
    }
}
