// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and hands a PipelineConfig to the
// application layer. Nothing here computes anything.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, TrainArgs};

#[derive(Parser, Debug)]
#[command(
    name = "dialogue-summarizer",
    version,
    about = "Train a character-level transformer to summarize dialogues."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args) => Self::run_train(args),
        }
    }

    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::summarize_use_case::SummarizeUseCase;

        tracing::info!("Training on '{}', validating on '{}'", args.train_path, args.val_path);

        let summary = SummarizeUseCase::new(args.into()).execute()?;

        tracing::info!(
            epochs = summary.history.len(),
            generated = summary.generated.as_ref().map_or(0, Vec::len),
            "Run complete"
        );
        Ok(())
    }
}
