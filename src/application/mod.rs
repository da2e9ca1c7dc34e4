// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers. No tensor math and no CLI
// types here; only the order in which things happen.

// Train → evaluate → generate
pub mod summarize_use_case;
