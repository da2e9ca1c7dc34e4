// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between a CSV file on disk and tensor batches:
//
//   samsum-*.csv
//       │
//       ▼
//   CsvCorpusLoader   → (dialogue, summary) examples
//       │
//       ▼
//   CharCodec         → fixed-length character-code sequences
//       │
//       ▼
//   SummaryDataset    → implements Burn's Dataset trait
//       │
//       ▼
//   SummaryBatcher    → stacks samples into [batch, max_length]
//       │
//       ▼
//   DataLoader        → feeds batches to train / eval / generate
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads (dialogue, summary) rows from CSV
pub mod loader;

/// Character-code encoding and decoding
pub mod codec;

/// Implements Burn's Dataset trait for encoded samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Seeded held-out split for the generation stage
pub mod splitter;
