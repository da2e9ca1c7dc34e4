// ============================================================
// Layer 2 — SummarizeUseCase
// ============================================================
// Runs the whole pipeline in order:
//
//   Step 1: Load train / validation corpora   (Layer 4 - data)
//   Step 2: Resolve the held-out test set     (Layer 4 - data)
//   Step 3: Encode everything with CharCodec  (Layer 4 - data)
//   Step 4: Build the model                   (Layer 5 - ml)
//   Step 5: Train with per-epoch validation   (Layer 5 - ml)
//   Step 6: Evaluate on validation + ROUGE    (Layer 5 - ml)
//   Step 7: Generate test summaries           (Layer 5 - ml)
//   Step 8: Print sample summaries
//
// The test set comes from --test-path when given, otherwise
// from a seeded split of the training corpus when
// --holdout-fraction > 0. With neither, Step 7 and Step 8 are
// skipped with a warning.
//
// Nothing is persisted: every run starts from fresh weights.

use anyhow::{ensure, Result};
use burn::{module::AutodiffModule, tensor::backend::AutodiffBackend};
use serde::{Deserialize, Serialize};

use crate::data::{
    codec::CharCodec,
    dataset::SummaryDataset,
    loader::CsvCorpusLoader,
    splitter::split_holdout,
};
use crate::domain::{dialogue::DialogueExample, traits::CorpusSource};
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::{
    device::{ComputeTarget, CpuBackend, GpuBackend},
    evaluator::{evaluate, EvaluationReport},
    generator::{generate_summaries, GeneratedSummary},
    model::TransformerSummarizerConfig,
    trainer::{ordered_loader, train, TrainingConfig},
};

// ─── Pipeline Configuration ──────────────────────────────────────────────────
// Every knob of a run. Serialisable so it can be logged as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub train_path:         String,
    pub val_path:           String,
    pub test_path:          Option<String>,
    pub holdout_fraction:   f64,
    pub max_length:         usize,
    pub batch_size:         usize,
    pub vocab_size:         usize,
    pub embed_size:         usize,
    pub num_heads:          usize,
    pub num_encoder_layers: usize,
    pub num_decoder_layers: usize,
    pub d_ff:               usize,
    pub dropout:            f64,
    pub lr:                 f64,
    pub epochs:             usize,
    pub seed:               u64,
    pub num_samples:        usize,
    pub padding_masks:      bool,
    pub device:             Option<ComputeTarget>,
    pub metrics_dir:        Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            train_path:         "data/samsum-train.csv".to_string(),
            val_path:           "data/samsum-validation.csv".to_string(),
            test_path:          None,
            holdout_fraction:   0.0,
            max_length:         128,
            batch_size:         16,
            vocab_size:         256,
            embed_size:         512,
            num_heads:          8,
            num_encoder_layers: 6,
            num_decoder_layers: 6,
            d_ff:               2048,
            dropout:            0.1,
            lr:                 5e-4,
            epochs:             10,
            seed:               42,
            num_samples:        5,
            padding_masks:      false,
            device:             None,
            metrics_dir:        None,
        }
    }
}

impl PipelineConfig {
    /// Reject settings the model or data pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.max_length >= 2, "max_length must be at least 2 (got {})", self.max_length);
        ensure!(self.batch_size >= 1, "batch_size must be at least 1");
        ensure!(self.vocab_size >= 1, "vocab_size must be at least 1");
        ensure!(self.num_heads >= 1, "num_heads must be at least 1");
        ensure!(
            self.embed_size % self.num_heads == 0,
            "embed_size ({}) must be divisible by num_heads ({})",
            self.embed_size, self.num_heads,
        );
        ensure!(
            (0.0..1.0).contains(&self.holdout_fraction),
            "holdout_fraction must be in [0, 1) (got {})",
            self.holdout_fraction,
        );
        Ok(())
    }

    pub fn codec(&self) -> CharCodec {
        CharCodec::new(self.max_length, self.vocab_size)
    }

    pub fn model_config(&self) -> TransformerSummarizerConfig {
        TransformerSummarizerConfig::new()
            .with_vocab_size(self.vocab_size)
            .with_max_length(self.max_length)
            .with_embed_size(self.embed_size)
            .with_num_heads(self.num_heads)
            .with_num_encoder_layers(self.num_encoder_layers)
            .with_num_decoder_layers(self.num_decoder_layers)
            .with_d_ff(self.d_ff)
            .with_dropout(self.dropout)
    }

    pub fn training_config(&self) -> TrainingConfig {
        TrainingConfig::new()
            .with_epochs(self.epochs)
            .with_batch_size(self.batch_size)
            .with_lr(self.lr)
            .with_seed(self.seed)
            .with_padding_masks(self.padding_masks)
    }
}

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub history:    Vec<EpochMetrics>,
    pub evaluation: EvaluationReport,
    /// `None` when no test set was configured
    pub generated:  Option<Vec<GeneratedSummary>>,
}

// ─── SummarizeUseCase ─────────────────────────────────────────────────────────
pub struct SummarizeUseCase {
    config: PipelineConfig,
}

impl SummarizeUseCase {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Validate the config, pick the backend once and run the pipeline on it.
    pub fn execute(&self) -> Result<RunSummary> {
        self.config.validate()?;
        tracing::debug!("Pipeline config: {}", serde_json::to_string(&self.config)?);

        match ComputeTarget::resolve(self.config.device) {
            ComputeTarget::Cpu => self.run::<CpuBackend>(&ComputeTarget::cpu_device()),
            ComputeTarget::Gpu => self.run::<GpuBackend>(&ComputeTarget::gpu_device()),
        }
    }

    /// The pipeline itself, generic over the training backend.
    pub fn run<B: AutodiffBackend>(&self, device: &B::Device) -> Result<RunSummary> {
        let cfg = &self.config;

        // ── Step 1: Load corpora ──────────────────────────────────────────────
        let mut train_examples = CsvCorpusLoader::new(&cfg.train_path).load_all()?;
        let val_examples       = CsvCorpusLoader::new(&cfg.val_path).load_all()?;

        // ── Step 2: Held-out test set ─────────────────────────────────────────
        let test_examples: Option<Vec<DialogueExample>> = match &cfg.test_path {
            Some(path) => Some(CsvCorpusLoader::new(path).load_all()?),
            None if cfg.holdout_fraction > 0.0 => {
                let (kept, held) = split_holdout(train_examples, cfg.holdout_fraction, cfg.seed);
                train_examples = kept;
                tracing::info!("Held out {} training examples as the test set", held.len());
                Some(held)
            }
            None => {
                tracing::warn!(
                    "No test set: pass --test-path or --holdout-fraction to run generation"
                );
                None
            }
        };

        // ── Step 3: Encode ────────────────────────────────────────────────────
        let codec = cfg.codec();
        let train_dataset = SummaryDataset::from_examples(&train_examples, &codec);
        let val_dataset   = SummaryDataset::from_examples(&val_examples, &codec);
        let eval_dataset  = val_dataset.clone();
        tracing::info!(
            "Encoded {} train / {} validation examples (max_length={})",
            train_dataset.sample_count(),
            val_dataset.sample_count(),
            cfg.max_length,
        );

        // ── Step 4: Model ─────────────────────────────────────────────────────
        let model = cfg.model_config().init::<B>(device);
        tracing::info!(
            "Model ready: {} encoder / {} decoder layers, embed_size={}, heads={}",
            cfg.num_encoder_layers, cfg.num_decoder_layers, cfg.embed_size, cfg.num_heads,
        );

        // ── Step 5: Train ─────────────────────────────────────────────────────
        let metrics = cfg.metrics_dir.as_deref().map(MetricsLogger::new).transpose()?;
        let (model, history) = train(
            model,
            &cfg.training_config(),
            train_dataset,
            val_dataset,
            metrics.as_ref(),
            device,
        )?;

        // ── Step 6: Evaluate ──────────────────────────────────────────────────
        let model = model.valid();
        let eval_loader = ordered_loader::<B::InnerBackend>(eval_dataset, cfg.batch_size, device);
        let evaluation  = evaluate(&model, &eval_loader, cfg.padding_masks)?;

        // ── Step 7 + 8: Generate and show samples ─────────────────────────────
        let generated = match test_examples {
            Some(examples) => {
                let test_dataset = SummaryDataset::from_examples(&examples, &codec);
                let test_loader  = ordered_loader::<B::InnerBackend>(test_dataset, cfg.batch_size, device);
                let summaries    = generate_summaries(&model, &test_loader, cfg.padding_masks)?;
                print_samples(&summaries, cfg.num_samples);
                Some(summaries)
            }
            None => None,
        };

        Ok(RunSummary { history, evaluation, generated })
    }
}

fn print_samples(summaries: &[GeneratedSummary], count: usize) {
    for s in summaries.iter().take(count) {
        println!("Original Dialogue: {}", s.dialogue);
        println!("Generated Summary: {}", s.generated);
        println!("Reference Summary: {}", s.reference);
        println!("{}", "-".repeat(50));
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(dir: &tempfile::TempDir, name: &str, rows: &[(&str, &str)]) -> String {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "id,dialogue,summary").unwrap();
        for (i, (dialogue, summary)) in rows.iter().enumerate() {
            writeln!(f, "{i},\"{dialogue}\",\"{summary}\"").unwrap();
        }
        path.to_string_lossy().into_owned()
    }

    fn tiny(dir: &tempfile::TempDir) -> PipelineConfig {
        let rows = [("Hi there", "Hi"), ("Bye now", "Bye"), ("Yes sir", "Yes"), ("No way", "No")];
        PipelineConfig {
            train_path:         write_csv(dir, "train.csv", &rows),
            val_path:           write_csv(dir, "val.csv", &rows[..2]),
            max_length:         8,
            batch_size:         2,
            embed_size:         16,
            num_heads:          2,
            num_encoder_layers: 1,
            num_decoder_layers: 1,
            d_ff:               32,
            dropout:            0.0,
            epochs:             1,
            device:             Some(ComputeTarget::Cpu),
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_heads_not_dividing_embed_size() {
        let cfg = PipelineConfig { embed_size: 10, num_heads: 3, ..PipelineConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_holdout_fraction() {
        let cfg = PipelineConfig { holdout_fraction: 1.0, ..PipelineConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_end_to_end_with_test_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = tiny(&dir);
        cfg.test_path   = Some(write_csv(&dir, "test.csv", &[("Hi there", "Hi")]));
        cfg.metrics_dir = Some(dir.path().join("metrics").to_string_lossy().into_owned());

        let summary = SummarizeUseCase::new(cfg).run::<CpuBackend>(&ComputeTarget::cpu_device()).unwrap();

        assert_eq!(summary.history.len(), 1);
        assert_eq!(summary.evaluation.references, vec!["Hi", "Bye"]);
        let generated = summary.generated.unwrap();
        assert_eq!(generated.len(), 1);
        assert_eq!(generated[0].dialogue, "Hi there");
        assert!(dir.path().join("metrics").join("metrics.csv").exists());
    }

    #[test]
    fn test_holdout_split_feeds_generation() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = tiny(&dir);
        cfg.holdout_fraction = 0.5;

        let summary = SummarizeUseCase::new(cfg).run::<CpuBackend>(&ComputeTarget::cpu_device()).unwrap();
        assert_eq!(summary.generated.unwrap().len(), 2);
    }

    #[test]
    fn test_without_test_set_generation_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = tiny(&dir);
        cfg.epochs = 0;

        let summary = SummarizeUseCase::new(cfg).run::<CpuBackend>(&ComputeTarget::cpu_device()).unwrap();
        assert!(summary.history.is_empty());
        assert!(summary.generated.is_none());
        assert_eq!(summary.evaluation.references.len(), 2);
    }

    #[test]
    fn test_missing_corpus_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = tiny(&dir);
        cfg.train_path = dir.path().join("nope.csv").to_string_lossy().into_owned();

        assert!(SummarizeUseCase::new(cfg).run::<CpuBackend>(&ComputeTarget::cpu_device()).is_err());
    }

    #[test]
    fn test_auto_device_runs_on_any_host() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = tiny(&dir);
        cfg.device = None;
        cfg.epochs = 0;

        let summary = SummarizeUseCase::new(cfg).execute().unwrap();
        assert_eq!(summary.evaluation.references, vec!["Hi", "Bye"]);
    }
}
