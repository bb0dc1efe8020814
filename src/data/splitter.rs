// ============================================================
// Layer 4 — Train/Validation Splitter
// ============================================================
// Shuffles samples with a fixed seed and splits them into
// a training set and a validation set. The seed makes the
// partition reproducible across runs, so a logged AUC can be
// compared against an earlier run of the same data.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom.
//
// Reference: rand crate documentation

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Deterministically shuffle `samples` and split into
/// (train, validation).
///
/// `train_fraction` is the proportion kept for training,
/// e.g. 0.95 keeps 95% and holds out 5%.
pub fn split_train_val<T>(
    mut samples: Vec<T>,
    train_fraction: f64,
    seed: u64,
) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    let total = samples.len();
    let split_at = ((total as f64) * train_fraction).round() as usize;
    let split_at = split_at.min(total);

    // split_off(n) removes elements [n..] and returns them
    let val = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} validation",
        samples.len(),
        val.len(),
    );

    (samples, val)
}
