// ============================================================
// Layer 5 — Sinusoidal Positional Table
// ============================================================
// Attention is permutation-invariant, so token order has to be
// injected explicitly. Here that is done with the fixed
// sinusoid table from Vaswani et al. (2017):
//
//   PE[p][2i]   = sin(p / 10000^(2i / d))
//   PE[p][2i+1] = cos(p / 10000^(2i / d))
//
// where p is the position and d the embedding width. The table
// is computed once, on the host, in f64 and stored as f32, so
// the same arguments always yield the same bits.
//
// Reference: Vaswani et al. (2017) §3.5

use burn::prelude::*;

/// `[max_length, embed_size]` table, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionalTable {
    pub max_length: usize,
    pub embed_size: usize,
    values: Vec<f32>,
}

/// Build the table for positions `0..max_length`.
///
/// With an odd `embed_size` the last column is a sine with no
/// cosine partner.
pub fn generate(embed_size: usize, max_length: usize) -> PositionalTable {
    let mut values = Vec::with_capacity(max_length * embed_size);

    for pos in 0..max_length {
        for col in 0..embed_size {
            // Both columns of a sin/cos pair share the even index 2i
            let pair = (col - col % 2) as f64;
            let angle = pos as f64 / 10000f64.powf(pair / embed_size as f64);
            let value = if col % 2 == 0 { angle.sin() } else { angle.cos() };
            values.push(value as f32);
        }
    }

    PositionalTable { max_length, embed_size, values }
}

impl PositionalTable {
    pub fn get(&self, pos: usize, col: usize) -> f32 {
        self.values[pos * self.embed_size + col]
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Upload to `device` as a `[max_length, embed_size]` float tensor.
    pub fn to_tensor<B: Backend>(&self, device: &B::Device) -> Tensor<B, 2> {
        Tensor::<B, 1>::from_floats(self.values.as_slice(), device)
            .reshape([self.max_length, self.embed_size])
    }
}
