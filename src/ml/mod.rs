// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn tensor code lives here. Other layers hand over
// datasets and configs and get back plain Rust values.
//
//   positional.rs — fixed sinusoid table
//   model.rs      — embedding + transformer encoder/decoder +
//                   vocabulary projection
//   loss.rs       — cross-entropy that ignores padding labels
//   trainer.rs    — Adam training loop with per-epoch validation
//   evaluator.rs  — loss, argmax decoding and ROUGE
//   generator.rs  — greedy autoregressive decoding
//   device.rs     — CPU / GPU backend selection
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)
//            Vaswani et al. (2017) Attention Is All You Need

/// Sinusoidal positional table
pub mod positional;

/// Transformer encoder-decoder summarizer
pub mod model;

/// Padding-aware cross-entropy
pub mod loss;

/// Training loop with validation
pub mod trainer;

/// Evaluation loop with ROUGE
pub mod evaluator;

/// Greedy autoregressive generation
pub mod generator;

/// Backend / device selection
pub mod device;

#[cfg(test)]
pub(crate) mod test_utils {
    use super::model::TransformerSummarizerConfig;

    /// Small enough to run a full train step on the CPU backend in tests.
    pub fn tiny_config() -> TransformerSummarizerConfig {
        TransformerSummarizerConfig::new()
            .with_max_length(8)
            .with_embed_size(16)
            .with_num_heads(2)
            .with_num_encoder_layers(1)
            .with_num_decoder_layers(1)
            .with_d_ff(32)
            .with_dropout(0.0)
    }
}
