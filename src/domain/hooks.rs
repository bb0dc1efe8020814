// ============================================================
// Layer 3 — Post-Epoch Hooks
// ============================================================
// After every training epoch the trainer runs the model over
// the validation slice and hands the resulting predictions to
// every registered hook. A hook may log, write metrics, or
// signal early stopping by returning HookSignal::Stop.
//
// Hooks are trait objects in a list, so evaluation concerns
// (ROC-AUC logging, CSV metrics) stay out of the training
// loop itself and can be combined per run.

use anyhow::Result;

use crate::domain::record::LABEL_COUNT;

/// Everything a hook gets to see after one epoch.
#[derive(Debug, Clone)]
pub struct EpochEvaluation {
    /// 1-based epoch number
    pub epoch: usize,

    /// Average loss over all training batches of this epoch
    pub train_loss: f64,

    /// Fraction of label flags predicted correctly at threshold 0.5
    /// on the training batches. A weak summary for imbalanced
    /// multi-label data; ROC-AUC is the real evaluation.
    pub train_accuracy: f64,

    /// Model probabilities on the validation slice, one row per record
    pub predictions: Vec<[f32; LABEL_COUNT]>,

    /// Ground-truth validation labels, same order as `predictions`
    pub targets: Vec<[f32; LABEL_COUNT]>,
}

/// What the trainer should do after the hook ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookSignal {
    Continue,
    Stop,
}

/// Invoked by the trainer after every epoch, in registration order.
/// A failing hook aborts the whole run.
pub trait EpochHook {
    fn on_epoch_end(&mut self, eval: &EpochEvaluation) -> Result<HookSignal>;
}
