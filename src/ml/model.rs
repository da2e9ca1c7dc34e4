use burn::{
    nn::{
        transformer::{
            TransformerDecoder, TransformerDecoderConfig, TransformerDecoderInput,
            TransformerEncoder, TransformerEncoderConfig, TransformerEncoderInput,
        },
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
    },
    prelude::*,
};

use crate::data::{batcher::SummaryBatch, codec::PAD_ID};
use crate::ml::{loss::masked_cross_entropy, positional};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize.
#[derive(Config, Debug)]
pub struct TransformerSummarizerConfig {
    /// One id per character code
    #[config(default = 256)]
    pub vocab_size: usize,
    /// Rows in the positional table; no sequence may be longer
    #[config(default = 128)]
    pub max_length: usize,
    #[config(default = 512)]
    pub embed_size: usize,
    #[config(default = 8)]
    pub num_heads: usize,
    #[config(default = 6)]
    pub num_encoder_layers: usize,
    #[config(default = 6)]
    pub num_decoder_layers: usize,
    #[config(default = 2048)]
    pub d_ff: usize,
    #[config(default = 0.1)]
    pub dropout: f64,
}

impl TransformerSummarizerConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> TransformerSummarizer<B> {
        let embedding  = EmbeddingConfig::new(self.vocab_size, self.embed_size).init(device);
        let positional = positional::generate(self.embed_size, self.max_length).to_tensor(device);
        let encoder = TransformerEncoderConfig::new(
            self.embed_size, self.d_ff, self.num_heads, self.num_encoder_layers,
        )
        .with_dropout(self.dropout)
        .init(device);
        let decoder = TransformerDecoderConfig::new(
            self.embed_size, self.d_ff, self.num_heads, self.num_decoder_layers,
        )
        .with_dropout(self.dropout)
        .init(device);
        let output = LinearConfig::new(self.embed_size, self.vocab_size).init(device);
        TransformerSummarizer {
            embedding, positional, encoder, decoder, output,
            vocab_size: self.vocab_size,
        }
    }
}

#[derive(Module, Debug)]
pub struct TransformerSummarizer<B: Backend> {
    /// Shared by dialogue and summary tokens
    pub embedding:  Embedding<B>,
    /// [max_length, embed_size], constant (not a parameter)
    pub positional: Tensor<B, 2>,
    pub encoder:    TransformerEncoder<B>,
    pub decoder:    TransformerDecoder<B>,
    pub output:     Linear<B>,
    pub vocab_size: usize,
}

/// `true` wherever `ids` holds the padding id.
pub fn padding_mask<B: Backend>(ids: &Tensor<B, 2, Int>) -> Tensor<B, 2, Bool> {
    ids.clone().equal_elem(PAD_ID as i32)
}

impl<B: Backend> TransformerSummarizer<B> {
    /// source: [batch, src_len], target: [batch, tgt_len]
    /// → scores: [batch, tgt_len, vocab_size]
    ///
    /// Masks mark pad positions with `true`. The source mask is applied
    /// to the encoder, the target mask to the decoder's self-attention.
    pub fn forward(
        &self,
        source:      Tensor<B, 2, Int>,
        target:      Tensor<B, 2, Int>,
        source_mask: Option<Tensor<B, 2, Bool>>,
        target_mask: Option<Tensor<B, 2, Bool>>,
    ) -> Tensor<B, 3> {
        let source = self.embed(source);
        let target = self.embed(target);

        let mut encoder_input = TransformerEncoderInput::new(source);
        if let Some(mask) = source_mask {
            encoder_input = encoder_input.mask_pad(mask);
        }
        let memory = self.encoder.forward(encoder_input);

        let mut decoder_input = TransformerDecoderInput::new(target, memory);
        if let Some(mask) = target_mask {
            decoder_input = decoder_input.target_mask_pad(mask);
        }
        let decoded = self.decoder.forward(decoder_input);

        self.output.forward(decoded)
    }

    /// [`forward`](Self::forward) with masks derived from the ids when
    /// `padding_masks` is set, and no masks otherwise.
    pub fn forward_tokens(
        &self,
        source:        Tensor<B, 2, Int>,
        target:        Tensor<B, 2, Int>,
        padding_masks: bool,
    ) -> Tensor<B, 3> {
        if padding_masks {
            let source_mask = padding_mask(&source);
            let target_mask = padding_mask(&target);
            self.forward(source, target, Some(source_mask), Some(target_mask))
        } else {
            self.forward(source, target, None, None)
        }
    }

    /// Teacher-forced loss on one batch.
    ///
    /// Returns the loss and the scores `[batch, max_length - 1, vocab_size]`.
    pub fn forward_loss(
        &self,
        batch:         &SummaryBatch<B>,
        padding_masks: bool,
    ) -> (Tensor<B, 1>, Tensor<B, 3>) {
        let (decoder_input, labels) = batch.shifted_targets();
        let [batch_size, seq_len] = labels.dims();

        let scores = self.forward_tokens(batch.source_ids.clone(), decoder_input, padding_masks);

        let loss = masked_cross_entropy(
            scores.clone().reshape([batch_size * seq_len, self.vocab_size]),
            labels.reshape([batch_size * seq_len]),
            PAD_ID,
        );
        (loss, scores)
    }

    /// Token embedding plus the positional table truncated to the sequence length.
    fn embed(&self, ids: Tensor<B, 2, Int>) -> Tensor<B, 3> {
        let [batch_size, seq_len] = ids.dims();
        let [_, embed_size] = self.positional.dims();

        let tokens = self.embedding.forward(ids);
        let positions = self.positional.clone()
            .slice([0..seq_len, 0..embed_size])
            .unsqueeze::<3>()
            .expand([batch_size, seq_len, embed_size]);

        tokens + positions
    }
}
