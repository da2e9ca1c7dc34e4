// ============================================================
// Layer 5 — Masked Cross-Entropy
// ============================================================
// Next-token cross-entropy where positions labelled with the
// padding id do not count:
//
//   loss = -Σ_{i: y_i ≠ pad} log softmax(z_i)[y_i]  /  #{i: y_i ≠ pad}
//
// The mean is over real tokens only, so a short summary is not
// diluted by its padding. If every label is padding the sum is
// empty and the loss is exactly zero (the count is clamped to 1).

use burn::{prelude::*, tensor::activation::log_softmax};

/// logits: [n, vocab], targets: [n] → scalar loss of shape [1].
pub fn masked_cross_entropy<B: Backend>(
    logits:  Tensor<B, 2>,
    targets: Tensor<B, 1, Int>,
    pad_id:  u32,
) -> Tensor<B, 1> {
    let [n, _vocab] = logits.dims();

    let log_probs = log_softmax(logits, 1);
    let picked = log_probs
        .gather(1, targets.clone().reshape([n, 1]))
        .reshape([n]);

    let keep  = targets.not_equal_elem(pad_id as i32).float();
    let count = keep.clone().sum().clamp_min(1.0);

    (picked * keep).sum().neg() / count
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::nn::loss::CrossEntropyLossConfig;

    type TestBackend = NdArray;

    fn logits(device: &<TestBackend as Backend>::Device) -> Tensor<TestBackend, 2> {
        Tensor::<TestBackend, 1>::from_floats(
            [0.5, 1.0, -2.0, 0.0, 3.0, 0.1, -1.0, 0.2, 0.3, 2.0, 0.0, 1.5],
            device,
        )
        .reshape([3, 4])
    }

    fn scalar(t: Tensor<TestBackend, 1>) -> f32 {
        t.into_scalar().elem::<f32>()
    }

    #[test]
    fn test_all_padding_contributes_nothing() {
        let device = Default::default();
        let targets = Tensor::<TestBackend, 1, Int>::from_ints([0, 0, 0], &device);
        let loss = masked_cross_entropy(logits(&device), targets, 0);
        assert!(scalar(loss).abs() < 1e-7);
    }

    #[test]
    fn test_without_padding_matches_plain_cross_entropy() {
        let device = Default::default();
        let targets = Tensor::<TestBackend, 1, Int>::from_ints([1, 3, 2], &device);

        let ours  = masked_cross_entropy(logits(&device), targets.clone(), 0);
        let plain = CrossEntropyLossConfig::new()
            .init(&device)
            .forward(logits(&device), targets);

        assert!((scalar(ours) - scalar(plain)).abs() < 1e-5);
    }

    #[test]
    fn test_padding_rows_are_excluded_from_the_mean() {
        let device = Default::default();
        // Only the middle row is a real label
        let masked = masked_cross_entropy(
            logits(&device),
            Tensor::<TestBackend, 1, Int>::from_ints([0, 3, 0], &device),
            0,
        );

        let middle = logits(&device).slice([1..2, 0..4]);
        let single = masked_cross_entropy(
            middle,
            Tensor::<TestBackend, 1, Int>::from_ints([3], &device),
            0,
        );

        assert!((scalar(masked) - scalar(single)).abs() < 1e-6);
    }
}
