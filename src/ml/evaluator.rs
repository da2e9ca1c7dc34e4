// ============================================================
// Layer 5 — Evaluation Loop
// ============================================================
// Teacher-forced pass over a dataset with no parameter updates:
//
//   1. loss per batch (same masked cross-entropy as training)
//   2. argmax over the vocabulary at every position
//   3. decode predictions and the full reference targets to text
//   4. mean ROUGE-1 / ROUGE-L F-measure over all pairs
//
// Run it on the non-autodiff model (`model.valid()`).

use std::sync::Arc;

use anyhow::{anyhow, Result};
use burn::{data::dataloader::DataLoader, prelude::*};

use crate::data::{batcher::SummaryBatch, codec};
use crate::infra::rouge::{mean_fmeasures, RougeSummary};
use crate::ml::{model::TransformerSummarizer, trainer::average};

/// Everything the evaluation loop measured.
#[derive(Debug, Clone)]
pub struct EvaluationReport {
    pub avg_loss:    f64,
    pub references:  Vec<String>,
    pub predictions: Vec<String>,
    pub rouge:       RougeSummary,
}

/// Copy an Int tensor to the host as rows of i64.
pub fn int_rows<B: Backend>(ids: Tensor<B, 2, Int>) -> Result<Vec<Vec<i64>>> {
    let [_, seq_len] = ids.dims();
    let flat: Vec<i64> = ids
        .into_data()
        .convert::<i64>()
        .to_vec()
        .map_err(|e| anyhow!("Cannot read token ids from tensor: {e:?}"))?;
    Ok(flat.chunks(seq_len.max(1)).map(<[i64]>::to_vec).collect())
}

pub fn evaluate<B: Backend>(
    model:         &TransformerSummarizer<B>,
    loader:        &Arc<dyn DataLoader<B, SummaryBatch<B>>>,
    padding_masks: bool,
) -> Result<EvaluationReport> {
    let mut references  = Vec::new();
    let mut predictions = Vec::new();
    let mut loss_sum    = 0.0f64;
    let mut batches     = 0usize;

    for batch in loader.iter() {
        let (loss, scores) = model.forward_loss(&batch, padding_masks);
        loss_sum += loss.into_scalar().elem::<f64>();
        batches  += 1;

        // argmax over the vocabulary keeps a trailing dim of 1
        let [batch_size, seq_len, _] = scores.dims();
        let predicted = scores.argmax(2).reshape([batch_size, seq_len]);

        for (reference, prediction) in int_rows(batch.target_ids)?
            .into_iter()
            .zip(int_rows(predicted)?)
        {
            references.push(codec::decode(reference));
            predictions.push(codec::decode(prediction));
        }
    }

    let avg_loss = average(loss_sum, batches);
    println!("Validation Loss: {avg_loss}");

    let rouge = mean_fmeasures(&references, &predictions);
    println!("ROUGE-1: {}, ROUGE-L: {}", rouge.rouge1, rouge.rouge_l);
    tracing::info!(avg_loss, rouge1 = rouge.rouge1, rouge_l = rouge.rouge_l, "Evaluation finished");

    Ok(EvaluationReport { avg_loss, references, predictions, rouge })
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    use crate::data::{codec::CharCodec, dataset::SummaryDataset};
    use crate::domain::dialogue::DialogueExample;
    use crate::ml::{test_utils::tiny_config, trainer::ordered_loader};

    type TestBackend = NdArray;

    #[test]
    fn test_reports_one_pair_per_example() {
        let device = Default::default();
        let model: TransformerSummarizer<TestBackend> = tiny_config().init(&device);
        let codec = CharCodec::new(8, 256);
        let dataset = SummaryDataset::from_examples(
            &[
                DialogueExample::new("Hi there", "Hi"),
                DialogueExample::new("Bye now", " Bye "),
                DialogueExample::new("Ok", "Fine then"),
            ],
            &codec,
        );

        let loader = ordered_loader::<TestBackend>(dataset, 2, &device);
        let report = evaluate(&model, &loader, false).unwrap();

        assert_eq!(report.references, vec!["Hi", "Bye", "Fine the"]);
        assert_eq!(report.predictions.len(), 3);
        assert!(report.avg_loss.is_finite());
        assert!((0.0..=1.0).contains(&report.rouge.rouge1));
        assert!((0.0..=1.0).contains(&report.rouge.rouge_l));
    }

    #[test]
    fn test_int_rows() {
        let device = Default::default();
        let ids = Tensor::<TestBackend, 1, Int>::from_ints([1, 2, 3, 4, 5, 6], &device).reshape([2, 3]);
        assert_eq!(int_rows(ids).unwrap(), vec![vec![1, 2, 3], vec![4, 5, 6]]);
    }
}
