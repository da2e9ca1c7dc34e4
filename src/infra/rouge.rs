// ============================================================
// Layer 6 — ROUGE Overlap Scores
// ============================================================
// ROUGE-1 and ROUGE-L between a generated summary and its
// reference, as used to report summarisation quality.
//
// Tokenisation follows the usual ROUGE convention:
//   1. lowercase
//   2. every character that is not an ASCII letter or digit
//      becomes a space
//   3. split on whitespace
//   4. tokens longer than 3 characters are reduced to their
//      English (Porter2) stem, so "bakes" and "baked" match
//
// ROUGE-N counts clipped n-gram matches; ROUGE-L uses the
// longest common subsequence of the two token lists. Both are
// reported as precision / recall / F-measure, where
//   F = 2PR / (P + R)   (0 when P + R = 0)
//
// Reference: Lin (2004) ROUGE: A Package for Automatic
//            Evaluation of Summaries

use std::collections::HashMap;

use rust_stemmers::{Algorithm, Stemmer};

/// Shorter tokens are compared as written.
const MIN_STEM_LEN: usize = 4;

/// Precision, recall and F-measure of one comparison.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RougeScore {
    pub precision: f64,
    pub recall:    f64,
    pub fmeasure:  f64,
}

impl RougeScore {
    fn from_counts(overlap: usize, prediction_total: usize, reference_total: usize) -> Self {
        if prediction_total == 0 || reference_total == 0 {
            return Self::default();
        }
        let precision = overlap as f64 / prediction_total as f64;
        let recall    = overlap as f64 / reference_total as f64;
        let fmeasure  = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        Self { precision, recall, fmeasure }
    }
}

/// Lowercased, stemmed alphanumeric tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let stemmer = Stemmer::create(Algorithm::English);
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .map(|token| {
            if token.len() >= MIN_STEM_LEN {
                stemmer.stem(token).into_owned()
            } else {
                token.to_string()
            }
        })
        .collect()
}

fn ngram_counts(tokens: &[String], n: usize) -> HashMap<&[String], usize> {
    let mut counts = HashMap::new();
    if n > 0 && tokens.len() >= n {
        for window in tokens.windows(n) {
            *counts.entry(window).or_insert(0) += 1;
        }
    }
    counts
}

/// ROUGE-N between `reference` and `prediction`.
pub fn rouge_n(reference: &str, prediction: &str, n: usize) -> RougeScore {
    let reference  = tokenize(reference);
    let prediction = tokenize(prediction);

    let ref_counts  = ngram_counts(&reference, n);
    let pred_counts = ngram_counts(&prediction, n);

    let overlap: usize = pred_counts
        .iter()
        .map(|(gram, &count)| count.min(ref_counts.get(gram).copied().unwrap_or(0)))
        .sum();

    RougeScore::from_counts(
        overlap,
        pred_counts.values().sum(),
        ref_counts.values().sum(),
    )
}

/// ROUGE-L between `reference` and `prediction`.
pub fn rouge_l(reference: &str, prediction: &str) -> RougeScore {
    let reference  = tokenize(reference);
    let prediction = tokenize(prediction);
    let lcs = lcs_length(&reference, &prediction);
    RougeScore::from_counts(lcs, prediction.len(), reference.len())
}

/// Length of the longest common subsequence, one DP row at a time.
fn lcs_length(a: &[String], b: &[String]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for x in a {
        for (j, y) in b.iter().enumerate() {
            curr[j + 1] = if x == y {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Mean ROUGE-1 and ROUGE-L F-measures over aligned pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RougeSummary {
    pub rouge1: f64,
    pub rouge_l: f64,
}

/// Score every (reference, prediction) pair and average the F-measures.
///
/// Both means are NaN when there are no pairs.
pub fn mean_fmeasures(references: &[String], predictions: &[String]) -> RougeSummary {
    let pairs = references.len().min(predictions.len());
    if pairs == 0 {
        return RougeSummary { rouge1: f64::NAN, rouge_l: f64::NAN };
    }

    let (r1, rl) = references
        .iter()
        .zip(predictions)
        .fold((0.0, 0.0), |(r1, rl), (reference, prediction)| {
            (
                r1 + rouge_n(reference, prediction, 1).fmeasure,
                rl + rouge_l(reference, prediction).fmeasure,
            )
        });

    RougeSummary {
        rouge1:  r1 / pairs as f64,
        rouge_l: rl / pairs as f64,
    }
}
