// ============================================================
// Layer 3 — Dialogue Domain Type
// ============================================================
// One row of the corpus: a chat transcript and the human
// written summary of it. Plain data, no behaviour beyond
// construction. Everything downstream (codec, dataset,
// evaluation printouts) starts from this struct.

use serde::{Deserialize, Serialize};

/// A (dialogue, summary) pair read once from the corpus.
///
/// Field names match the CSV header so the loader can
/// deserialise rows straight into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueExample {
    /// The full conversation, usually several `Name: message` lines
    pub dialogue: String,

    /// The reference summary the model learns to produce
    pub summary: String,
}

impl DialogueExample {
    pub fn new(dialogue: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            dialogue: dialogue.into(),
            summary:  summary.into(),
        }
    }
}
