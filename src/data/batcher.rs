// ============================================================
// Layer 4 — Summary Batcher
// ============================================================
// Implements Burn's Batcher trait to stack a Vec<SummarySample>
// into two integer tensors on the target device.
//
// How batching works here:
//   Input:  N samples, each with source/target of length L
//   Output: SummaryBatch with tensors of shape [N, L]
//
//   Every sample is already padded to the same length by the
//   codec, so stacking is a flatten + reshape:
//   [s1_t1, ..., s1_tL, s2_t1, ..., sN_tL] → [N, L]
//
// The DataLoader built on top of this batcher is the batch
// source: shuffled with a fixed seed for training, in corpus
// order for validation and test.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::SummarySample;

// ─── SummaryBatch ─────────────────────────────────────────────────────────────
/// A batch of encoded (dialogue, summary) pairs.
#[derive(Debug, Clone)]
pub struct SummaryBatch<B: Backend> {
    /// Encoded dialogues — shape: [batch_size, max_length]
    pub source_ids: Tensor<B, 2, Int>,

    /// Encoded summaries — shape: [batch_size, max_length]
    pub target_ids: Tensor<B, 2, Int>,
}

impl<B: Backend> SummaryBatch<B> {
    /// Teacher forcing split of the targets.
    ///
    /// Returns (decoder_input, labels): the target without its last
    /// position, and the target without its first position.
    pub fn shifted_targets(&self) -> (Tensor<B, 2, Int>, Tensor<B, 2, Int>) {
        let [batch_size, seq_len] = self.target_ids.dims();
        let decoder_input = self.target_ids.clone().slice([0..batch_size, 0..seq_len - 1]);
        let labels        = self.target_ids.clone().slice([0..batch_size, 1..seq_len]);
        (decoder_input, labels)
    }
}

// ─── SummaryBatcher ───────────────────────────────────────────────────────────
/// Stateless: the device comes from the DataLoader on every call.
#[derive(Clone, Debug, Default)]
pub struct SummaryBatcher;

impl SummaryBatcher {
    pub fn new() -> Self {
        Self
    }
}

impl<B: Backend> Batcher<B, SummarySample, SummaryBatch<B>> for SummaryBatcher {
    fn batch(&self, items: Vec<SummarySample>, device: &B::Device) -> SummaryBatch<B> {
        let batch_size = items.len();
        let seq_len    = items[0].source_ids.len();

        // Burn builds Int tensors from i32 slices
        let source_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.source_ids.iter().map(|&x| x as i32))
            .collect();
        let target_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.target_ids.iter().map(|&x| x as i32))
            .collect();

        let source_ids = Tensor::<B, 1, Int>::from_ints(source_flat.as_slice(), device)
            .reshape([batch_size, seq_len]);
        let target_ids = Tensor::<B, 1, Int>::from_ints(target_flat.as_slice(), device)
            .reshape([batch_size, seq_len]);

        SummaryBatch { source_ids, target_ids }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn sample(src: &[u32], tgt: &[u32]) -> SummarySample {
        SummarySample { source_ids: src.to_vec(), target_ids: tgt.to_vec() }
    }

    #[test]
    fn test_batch_shapes() {
        let device = Default::default();
        let batch: SummaryBatch<TestBackend> = SummaryBatcher::new().batch(
            vec![sample(&[1, 2, 3, 0], &[4, 5, 0, 0]), sample(&[6, 7, 0, 0], &[8, 0, 0, 0])],
            &device,
        );
        assert_eq!(batch.source_ids.dims(), [2, 4]);
        assert_eq!(batch.target_ids.dims(), [2, 4]);

        let flat: Vec<i64> = batch.source_ids.into_data().convert::<i64>().to_vec().unwrap();
        assert_eq!(flat, vec![1, 2, 3, 0, 6, 7, 0, 0]);
    }

    #[test]
    fn test_shifted_targets() {
        let device = Default::default();
        let batch: SummaryBatch<TestBackend> =
            SummaryBatcher::new().batch(vec![sample(&[1, 1, 1, 1], &[72, 105, 33, 0])], &device);

        let (input, labels) = batch.shifted_targets();
        let input: Vec<i64>  = input.into_data().convert::<i64>().to_vec().unwrap();
        let labels: Vec<i64> = labels.into_data().convert::<i64>().to_vec().unwrap();
        assert_eq!(input,  vec![72, 105, 33]);
        assert_eq!(labels, vec![105, 33, 0]);
    }
}
