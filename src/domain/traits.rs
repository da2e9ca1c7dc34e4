// ============================================================
// Layer 3 — Core Traits
// ============================================================
// The application layer loads examples through this trait so
// it never depends on the file format directly. CsvCorpusLoader
// is the only implementation today.

use anyhow::Result;
use crate::domain::dialogue::DialogueExample;

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Any component that can produce (dialogue, summary) examples.
pub trait CorpusSource {
    /// Load every example from this source, in source order.
    fn load_all(&self) -> Result<Vec<DialogueExample>>;
}

