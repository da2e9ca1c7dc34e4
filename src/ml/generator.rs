// ============================================================
// Layer 5 — Autoregressive Generator
// ============================================================
// Greedy decoding, one position at a time:
//
//   out    = zeros([batch, target_len])
//   out[:, 0] = source[:, 0]          ← used as the start marker
//   for t in 1..target_len:
//       scores   = model(source, out[:, ..t])
//       out[:, t] = argmax(scores[:, t-1])
//
// Position t depends on every position before it, so the loop
// is strictly sequential; the rows of a batch advance together.

use std::sync::Arc;

use anyhow::Result;
use burn::{data::dataloader::DataLoader, prelude::*};

use crate::data::{batcher::SummaryBatch, codec};
use crate::ml::{evaluator::int_rows, model::TransformerSummarizer};

/// One generated summary next to its inputs, all as text.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSummary {
    pub dialogue:  String,
    pub generated: String,
    pub reference: String,
}

/// Greedy-decode `target_len` tokens for every row of `source`.
pub fn generate<B: Backend>(
    model:         &TransformerSummarizer<B>,
    source:        Tensor<B, 2, Int>,
    target_len:    usize,
    padding_masks: bool,
) -> Tensor<B, 2, Int> {
    let [batch_size, _] = source.dims();
    let device = source.device();

    let mut decoded = Tensor::<B, 2, Int>::zeros([batch_size, target_len], &device);
    if target_len == 0 {
        return decoded;
    }

    let start = source.clone().slice([0..batch_size, 0..1]);
    decoded = decoded.slice_assign([0..batch_size, 0..1], start);

    for t in 1..target_len {
        let prefix = decoded.clone().slice([0..batch_size, 0..t]);
        let scores = model.forward_tokens(source.clone(), prefix, padding_masks);

        let [_, _, vocab_size] = scores.dims();
        let next = scores
            .slice([0..batch_size, t - 1..t, 0..vocab_size])
            .argmax(2)
            .reshape([batch_size, 1]);

        decoded = decoded.slice_assign([0..batch_size, t..t + 1], next);
    }

    decoded
}

/// Generate a summary for every example of `loader`, at the targets' length.
pub fn generate_summaries<B: Backend>(
    model:         &TransformerSummarizer<B>,
    loader:        &Arc<dyn DataLoader<B, SummaryBatch<B>>>,
    padding_masks: bool,
) -> Result<Vec<GeneratedSummary>> {
    let mut summaries = Vec::new();

    for batch in loader.iter() {
        let [_, target_len] = batch.target_ids.dims();
        let decoded = generate(model, batch.source_ids.clone(), target_len, padding_masks);

        let dialogues  = int_rows(batch.source_ids)?;
        let references = int_rows(batch.target_ids)?;
        let generated  = int_rows(decoded)?;

        for ((dialogue, reference), generated) in dialogues.into_iter().zip(references).zip(generated) {
            summaries.push(GeneratedSummary {
                dialogue:  codec::decode(dialogue),
                generated: codec::decode(generated),
                reference: codec::decode(reference),
            });
        }
        tracing::debug!("Generated {} summaries so far", summaries.len());
    }

    Ok(summaries)
}
