// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers end to end. This layer owns
// the pipeline configuration and the order of operations, but
// no ML math, no tensor code, and no direct file parsing.
//
// Reference: Clean Architecture pattern

// The single train-and-predict workflow
pub mod pipeline;
