// ============================================================
// Layer 5 — ROC-AUC Evaluation
// ============================================================
// Rank-based ROC-AUC (equivalent to the Mann-Whitney U
// statistic) computed per label over the validation slice,
// plus the post-epoch hook that logs it.
//
// A label whose validation slice contains only positives or
// only negatives has no defined AUC; that is an error and it
// aborts the run, the same way the rest of the pipeline treats
// degenerate inputs.

use anyhow::{bail, Result};
use std::cmp::Ordering;

use crate::domain::hooks::{EpochEvaluation, EpochHook, HookSignal};
use crate::domain::record::{LABELS, LABEL_COUNT};

/// Area under the ROC curve for one binary label.
/// `labels` entries are 0.0 or 1.0; tied scores share their
/// average rank.
pub fn roc_auc(scores: &[f32], labels: &[f32]) -> Result<f64> {
    let n = scores.len();
    let positives = labels.iter().filter(|&&l| l > 0.5).count();
    let negatives = n - positives;
    if positives == 0 || negatives == 0 {
        bail!(
            "ROC-AUC undefined: validation slice has {} positives and {} negatives",
            positives,
            negatives,
        );
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        scores[a]
            .partial_cmp(&scores[b])
            .unwrap_or(Ordering::Equal)
    });

    // Average ranks over ties (1-based ranks).
    let mut ranks = vec![0.0f64; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && scores[order[j + 1]] == scores[order[i]] {
            j += 1;
        }
        let avg_rank = (i + j) as f64 / 2.0 + 1.0;
        for k in i..=j {
            ranks[order[k]] = avg_rank;
        }
        i = j + 1;
    }

    let positive_rank_sum: f64 = labels
        .iter()
        .zip(&ranks)
        .filter(|(&l, _)| l > 0.5)
        .map(|(_, &r)| r)
        .sum();

    let u = positive_rank_sum - (positives * (positives + 1)) as f64 / 2.0;
    Ok(u / (positives * negatives) as f64)
}

/// Per-label AUC over a validation slice of predictions.
pub fn per_label_auc(
    predictions: &[[f32; LABEL_COUNT]],
    targets: &[[f32; LABEL_COUNT]],
) -> Result<[f64; LABEL_COUNT]> {
    let mut result = [0.0f64; LABEL_COUNT];
    for label in 0..LABEL_COUNT {
        let scores: Vec<f32> = predictions.iter().map(|p| p[label]).collect();
        let flags: Vec<f32> = targets.iter().map(|t| t[label]).collect();
        result[label] = roc_auc(&scores, &flags)?;
    }
    Ok(result)
}

/// Post-epoch hook logging macro and per-label ROC-AUC.
pub struct RocAucHook {
    interval: usize,
}

impl RocAucHook {
    /// `interval` is in epochs; 1 evaluates after every epoch.
    pub fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
        }
    }
}

impl EpochHook for RocAucHook {
    fn on_epoch_end(&mut self, eval: &EpochEvaluation) -> Result<HookSignal> {
        if (eval.epoch - 1) % self.interval != 0 {
            return Ok(HookSignal::Continue);
        }

        let per_label = per_label_auc(&eval.predictions, &eval.targets)?;
        let macro_auc = per_label.iter().sum::<f64>() / LABEL_COUNT as f64;

        tracing::info!("ROC-AUC - epoch: {} - score: {:.6}", eval.epoch, macro_auc);
        for (name, auc) in LABELS.iter().zip(per_label) {
            tracing::info!("  {:<14} {:.6}", name, auc);
        }

        Ok(HookSignal::Continue)
    }
}
