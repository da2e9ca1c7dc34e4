// ============================================================
// Layer 4 — Held-out Splitter
// ============================================================
// Carves a held-out set off the end of a shuffled corpus.
// Used to build the generation stage's test set when no test
// file is supplied and --holdout-fraction is positive.
//
// The shuffle is seeded so the same seed always holds out the
// same examples.
//
// Reference: rand crate documentation (SliceRandom)

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Shuffle `samples` with `seed` and split into (kept, held_out),
/// where `held_out` is `holdout_fraction` of the total (rounded).
pub fn split_holdout<T>(mut samples: Vec<T>, holdout_fraction: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    let total    = samples.len();
    let held_out = ((total as f64) * holdout_fraction).round() as usize;
    let split_at = total - held_out.min(total);

    let held = samples.split_off(split_at);

    tracing::debug!(
        "Held-out split: {} kept, {} held out",
        samples.len(),
        held.len(),
    );

    (samples, held)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (kept, held)      = split_holdout(items, 0.2, 7);
        assert_eq!(kept.len(), 80);
        assert_eq!(held.len(), 20);
    }

    #[test]
    fn test_all_items_preserved() {
        let items: Vec<usize> = (0..50).collect();
        let (kept, held)      = split_holdout(items, 0.3, 7);
        let mut all: Vec<usize> = kept.into_iter().chain(held).collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_split() {
        let a = split_holdout((0..30).collect::<Vec<usize>>(), 0.5, 42);
        let b = split_holdout((0..30).collect::<Vec<usize>>(), 0.5, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_fraction_holds_out_nothing() {
        let (kept, held) = split_holdout((0..10).collect::<Vec<usize>>(), 0.0, 1);
        assert_eq!(kept.len(), 10);
        assert!(held.is_empty());
    }

    #[test]
    fn test_empty_dataset() {
        let (kept, held) = split_holdout(Vec::<usize>::new(), 0.8, 1);
        assert!(kept.is_empty());
        assert!(held.is_empty());
    }
}
