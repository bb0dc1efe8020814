// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with `clap`.
//
// The input paths are not configurable here: the job reads
// fixed relative paths under data/ (see PipelineConfig).
// The CLI only distinguishes:
//   1. no arguments      — run the full pipeline
//   2. the literal `smoke` — exit immediately without doing
//      any work (CI smoke-test path)
// plus the --force-retrain toggle for the skip-training branch.

use anyhow::Result;
use clap::Parser;

use crate::application::pipeline::{PipelineConfig, PipelineUseCase};

#[derive(Parser, Debug)]
#[command(
    name = "comment-toxicity",
    version = "0.1.0",
    about = "Train a bidirectional GRU toxicity classifier on comment data \
             and write test-set predictions."
)]
pub struct Cli {
    /// Pass the literal word `smoke` to exit immediately without
    /// running the pipeline.
    #[arg(value_parser = ["smoke"])]
    pub mode: Option<String>,

    /// Train even when a saved model artifact already exists.
    /// Off by default: an existing artifact is reused as-is.
    #[arg(long)]
    pub force_retrain: bool,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        if self.mode.as_deref() == Some("smoke") {
            return Ok(());
        }

        let config = PipelineConfig {
            force_retrain: self.force_retrain,
            ..PipelineConfig::default()
        };
        PipelineUseCase::new(config).execute()
    }
}
