// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting pieces with no Burn dependency:
//
//   metrics.rs — per-epoch loss CSV
//   rouge.rs   — ROUGE-1 / ROUGE-L overlap scores used by the
//                evaluation loop
//
// Reference: Rust Book §7 (Modules)

/// Training metrics CSV logger
pub mod metrics;

/// Text overlap scores
pub mod rouge;
