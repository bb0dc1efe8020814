// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records per-epoch metrics to a CSV file, one row per epoch:
//
//   epoch,train_loss,train_acc,mean_auc
//   1,0.112400,0.963100,0.931200
//   2,0.084200,0.971500,0.957800
//
// The file is appended to, not truncated, so metrics from
// repeated runs against the same artifact directory stay
// available for comparison.

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};

use crate::domain::hooks::{EpochEvaluation, EpochHook, HookSignal};
use crate::ml::evaluation::per_label_auc;

/// One row of metrics data for a single training epoch.
#[derive(Debug, Clone)]
pub struct EpochMetrics {
    pub epoch: usize,
    pub train_loss: f64,
    pub train_acc: f64,
    pub mean_auc: f64,
}

/// Appends epoch metrics to a CSV file.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create the logger, writing the CSV header if the file is new.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("metrics.csv");
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "epoch,train_loss,train_acc,mean_auc")?;
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new().append(true).open(&self.csv_path)?;
        writeln!(
            f,
            "{},{:.6},{:.6},{:.6}",
            m.epoch, m.train_loss, m.train_acc, m.mean_auc,
        )?;
        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

/// Post-epoch hook that appends one metrics row per epoch.
pub struct MetricsHook {
    logger: MetricsLogger,
}

impl MetricsHook {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            logger: MetricsLogger::new(dir)?,
        })
    }
}

impl EpochHook for MetricsHook {
    fn on_epoch_end(&mut self, eval: &EpochEvaluation) -> Result<HookSignal> {
        let per_label = per_label_auc(&eval.predictions, &eval.targets)?;
        let mean_auc = per_label.iter().sum::<f64>() / per_label.len() as f64;

        self.logger.log(&EpochMetrics {
            epoch: eval.epoch,
            train_loss: eval.train_loss,
            train_acc: eval.train_accuracy,
            mean_auc,
        })?;

        Ok(HookSignal::Continue)
    }
}
