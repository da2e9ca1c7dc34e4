// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// clap's derive macros generate --help text, error messages for
// bad values and the string → number conversions. Defaults are
// the SAMSum training setup: 128 characters, 512-wide model, 10 epochs.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};
use crate::application::summarize_use_case::PipelineConfig;
use crate::ml::device::ComputeTarget;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train on a dialogue corpus, evaluate with ROUGE, then generate test summaries
    Train(TrainArgs),
}

/// Where tensors are computed.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceArg {
    /// wgpu when an adapter is available, NdArray otherwise
    Auto,
    /// Pure-Rust NdArray backend
    Cpu,
    /// wgpu backend
    Gpu,
}

impl DeviceArg {
    fn into_target(self) -> Option<ComputeTarget> {
        match self {
            DeviceArg::Auto => None,
            DeviceArg::Cpu  => Some(ComputeTarget::Cpu),
            DeviceArg::Gpu  => Some(ComputeTarget::Gpu),
        }
    }
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// CSV with `dialogue` and `summary` columns used for training
    #[arg(long, default_value = "data/samsum-train.csv")]
    pub train_path: String,

    /// CSV used for per-epoch validation and the final ROUGE evaluation
    #[arg(long, default_value = "data/samsum-validation.csv")]
    pub val_path: String,

    /// CSV of held-out examples for the generation stage
    #[arg(long)]
    pub test_path: Option<String>,

    /// Without --test-path, hold out this fraction of the training
    /// corpus for generation (0 disables generation)
    #[arg(long, default_value_t = 0.0)]
    pub holdout_fraction: f64,

    /// Characters per sequence; longer text is truncated, shorter padded
    #[arg(long, default_value_t = 128)]
    pub max_length: usize,

    #[arg(long, default_value_t = 16)]
    pub batch_size: usize,

    /// Number of character codes the model can read and emit
    #[arg(long, default_value_t = 256)]
    pub vocab_size: usize,

    /// Width of token embeddings (d_model)
    #[arg(long, default_value_t = 512)]
    pub embed_size: usize,

    /// embed_size must be divisible by num_heads
    #[arg(long, default_value_t = 8)]
    pub num_heads: usize,

    #[arg(long, default_value_t = 6)]
    pub num_encoder_layers: usize,

    #[arg(long, default_value_t = 6)]
    pub num_decoder_layers: usize,

    /// Inner width of each layer's feed-forward network
    #[arg(long, default_value_t = 2048)]
    pub d_ff: usize,

    #[arg(long, default_value_t = 0.1)]
    pub dropout: f64,

    /// Adam learning rate
    #[arg(long, default_value_t = 5e-4)]
    pub lr: f64,

    #[arg(long, default_value_t = 10)]
    pub epochs: usize,

    /// Seeds batch shuffling and the held-out split
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// How many generated summaries to print
    #[arg(long, default_value_t = 5)]
    pub num_samples: usize,

    /// Pass key-padding masks to attention (off by default)
    #[arg(long)]
    pub padding_masks: bool,

    #[arg(long, value_enum, default_value_t = DeviceArg::Auto)]
    pub device: DeviceArg,

    /// Append per-epoch losses to {metrics_dir}/metrics.csv
    #[arg(long)]
    pub metrics_dir: Option<String>,
}

/// The application layer never sees clap types.
impl From<TrainArgs> for PipelineConfig {
    fn from(a: TrainArgs) -> Self {
        PipelineConfig {
            train_path:         a.train_path,
            val_path:           a.val_path,
            test_path:          a.test_path,
            holdout_fraction:   a.holdout_fraction,
            max_length:         a.max_length,
            batch_size:         a.batch_size,
            vocab_size:         a.vocab_size,
            embed_size:         a.embed_size,
            num_heads:          a.num_heads,
            num_encoder_layers: a.num_encoder_layers,
            num_decoder_layers: a.num_decoder_layers,
            d_ff:               a.d_ff,
            dropout:            a.dropout,
            lr:                 a.lr,
            epochs:             a.epochs,
            seed:               a.seed,
            num_samples:        a.num_samples,
            padding_masks:      a.padding_masks,
            device:             a.device.into_target(),
            metrics_dir:        a.metrics_dir,
        }
    }
}
