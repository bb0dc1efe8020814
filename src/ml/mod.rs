// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code.
// No other layer imports from burn directly, except the data
// batcher/dataset glue and the infra pieces that persist
// weights and the embedding matrix.
//
// What's in this layer:
//
//   model.rs      — The classifier architecture:
//                   • Embedding initialised from pretrained vectors
//                   • Spatial dropout over embedding channels
//                   • Bidirectional GRU returning per-step outputs
//                   • Average and max pooling over time, concatenated
//                   • Six sigmoid outputs, one per label
//
//   trainer.rs    — The training loop: forward pass, binary
//                   cross-entropy, Adam step, post-epoch hooks,
//                   artifact saving
//
//   evaluation.rs — Rank-based ROC-AUC and the logging hook
//
//   predictor.rs  — Loads the artifact and runs batched inference
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)
//            Cho et al. (2014) GRU
//            Kingma & Ba (2015) Adam

/// Bidirectional GRU multi-label classifier architecture
pub mod model;

/// Full training loop with validation hooks and artifact saving
pub mod trainer;

/// ROC-AUC computation and the post-epoch logging hook
pub mod evaluation;

/// Inference engine — loads the artifact and predicts probabilities
pub mod predictor;
