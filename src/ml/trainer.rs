// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Teacher-forced training with Adam, one validation pass per
// epoch:
//
//   Idle ─► [ Training ─► Validating ] × epochs ─► Idle
//
// Per batch:
//   decoder input = target[:, :-1]
//   labels        = target[:, 1:]
//   loss          = masked cross-entropy (label 0 ignored)
//   backward, one Adam step
//
// There is no retry, no checkpointing and no early stopping.
// With zero epochs the model is returned untouched.
//
// Burn notes:
//   - Training runs on an AutodiffBackend B
//   - model.valid() gives the same weights on B::InnerBackend,
//     with dropout disabled; validation uses that copy
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use std::sync::Arc;

use anyhow::Result;
use burn::{
    data::dataloader::{DataLoader, DataLoaderBuilder},
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::data::{
    batcher::{SummaryBatch, SummaryBatcher},
    dataset::SummaryDataset,
};
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::TransformerSummarizer;

#[derive(Config, Debug)]
pub struct TrainingConfig {
    #[config(default = 10)]
    pub epochs: usize,
    #[config(default = 16)]
    pub batch_size: usize,
    #[config(default = 5e-4)]
    pub lr: f64,
    /// Seeds the shuffling of training batches
    #[config(default = 42)]
    pub seed: u64,
    /// Feed key-padding masks to the attention layers
    #[config(default = false)]
    pub padding_masks: bool,
}

/// Build an in-order loader, as used for validation, evaluation and generation.
pub fn ordered_loader<B: Backend>(
    dataset:    SummaryDataset,
    batch_size: usize,
    device:     &B::Device,
) -> Arc<dyn DataLoader<B, SummaryBatch<B>>> {
    DataLoaderBuilder::new(SummaryBatcher::new())
        .batch_size(batch_size)
        .num_workers(1)
        .set_device(device.clone())
        .build(dataset)
}

/// Mean of the per-batch losses; NaN when there were no batches.
pub(crate) fn average(sum: f64, count: usize) -> f64 {
    if count > 0 { sum / count as f64 } else { f64::NAN }
}

/// Mean loss over every batch of `loader`, without gradients.
pub fn validation_loss<B: Backend>(
    model:         &TransformerSummarizer<B>,
    loader:        &Arc<dyn DataLoader<B, SummaryBatch<B>>>,
    padding_masks: bool,
) -> f64 {
    let mut loss_sum = 0.0f64;
    let mut batches  = 0usize;

    for batch in loader.iter() {
        let (loss, _) = model.forward_loss(&batch, padding_masks);
        loss_sum += loss.into_scalar().elem::<f64>();
        batches  += 1;
    }

    average(loss_sum, batches)
}

/// Train `model` for `cfg.epochs` epochs and return it with the
/// per-epoch losses.
pub fn train<B: AutodiffBackend>(
    mut model:     TransformerSummarizer<B>,
    cfg:           &TrainingConfig,
    train_dataset: SummaryDataset,
    val_dataset:   SummaryDataset,
    metrics:       Option<&MetricsLogger>,
    device:        &B::Device,
) -> Result<(TransformerSummarizer<B>, Vec<EpochMetrics>)> {
    let mut history: Vec<EpochMetrics> = Vec::with_capacity(cfg.epochs);
    if cfg.epochs == 0 {
        tracing::info!("Zero epochs requested, skipping training");
        return Ok((model, history));
    }

    // β1 = 0.9, β2 = 0.999, ε = 1e-8
    let mut optim = AdamConfig::new().with_epsilon(1e-8).init();

    let train_loader: Arc<dyn DataLoader<B, SummaryBatch<B>>> = DataLoaderBuilder::new(SummaryBatcher::new())
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .set_device(device.clone())
        .build(train_dataset);

    // Validation on the inner backend — no autodiff overhead
    let val_loader = ordered_loader::<B::InnerBackend>(val_dataset, cfg.batch_size, device);

    for epoch in 1..=cfg.epochs {
        let mut train_loss_sum = 0.0f64;
        let mut train_batches  = 0usize;

        for batch in train_loader.iter() {
            let (loss, _) = model.forward_loss(&batch, cfg.padding_masks);

            train_loss_sum += loss.clone().into_scalar().elem::<f64>();
            train_batches  += 1;

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let train_loss = average(train_loss_sum, train_batches);
        println!("Epoch {epoch}, Loss: {train_loss}");

        let val_loss = validation_loss(&model.valid(), &val_loader, cfg.padding_masks);
        println!("Validation Loss: {val_loss}");

        let m = EpochMetrics::new(epoch, train_loss, val_loss);
        tracing::info!(epoch, train_loss, val_loss, "Epoch finished");
        if let Some(logger) = metrics {
            logger.log(&m)?;
        }
        history.push(m);
    }

    tracing::info!("Training complete");
    Ok((model, history))
}
