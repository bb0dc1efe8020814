// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong in any specific
// business layer:
//
//   checkpoint.rs      — Saving and loading model weights
//                        via Burn's CompactRecorder, plus the
//                        model config JSON needed to rebuild
//                        the architecture at load time.
//
//   embedding_store.rs — Pretrained word-vector file parsing
//                        and the dense matrix aligned to the
//                        fitted vocabulary.
//
//   metrics.rs         — Per-epoch metrics written to a CSV
//                        file for later analysis.
//
// Reference: Burn Book §5 (Checkpointing)

/// Model artifact saving and loading
pub mod checkpoint;

/// Pretrained embedding parsing and matrix construction
pub mod embedding_store;

/// Training metrics CSV logger
pub mod metrics;
