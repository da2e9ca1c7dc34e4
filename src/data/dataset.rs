use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::data::codec::CharCodec;
use crate::domain::dialogue::DialogueExample;

/// One encoded example. Both sequences are exactly `max_length` long.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarySample {
    pub source_ids: Vec<u32>,
    pub target_ids: Vec<u32>,
}

impl SummarySample {
    pub fn encode(example: &DialogueExample, codec: &CharCodec) -> Self {
        Self {
            source_ids: codec.encode(&example.dialogue),
            target_ids: codec.encode(&example.summary),
        }
    }
}

/// Cloning copies the encoded samples; nothing is re-encoded.
#[derive(Clone)]
pub struct SummaryDataset {
    samples: Vec<SummarySample>,
}

impl SummaryDataset {
    pub fn new(samples: Vec<SummarySample>) -> Self { Self { samples } }

    /// Encode every example with the same codec.
    pub fn from_examples(examples: &[DialogueExample], codec: &CharCodec) -> Self {
        Self::new(examples.iter().map(|e| SummarySample::encode(e, codec)).collect())
    }

    pub fn sample_count(&self) -> usize { self.samples.len() }
}

impl Dataset<SummarySample> for SummaryDataset {
    fn get(&self, index: usize) -> Option<SummarySample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_examples_encodes_both_sides() {
        let codec = CharCodec::new(8, 256);
        let ds = SummaryDataset::from_examples(&[DialogueExample::new("Hi there", "Hi")], &codec);

        let sample = ds.get(0).unwrap();
        assert_eq!(sample.source_ids, vec![72, 105, 32, 116, 104, 101, 114, 101]);
        assert_eq!(sample.target_ids, vec![72, 105, 0, 0, 0, 0, 0, 0]);
        assert_eq!(ds.len(), 1);
        assert!(ds.get(1).is_none());
    }

    #[test]
    fn test_clone_keeps_encoded_samples() {
        let codec = CharCodec::new(4, 256);
        let ds = SummaryDataset::from_examples(
            &[DialogueExample::new("Yo", "Y"), DialogueExample::new("Ok", "O")],
            &codec,
        );
        let copy = ds.clone();

        assert_eq!(copy.len(), ds.len());
        for i in 0..ds.len() {
            let (a, b) = (ds.get(i).unwrap(), copy.get(i).unwrap());
            assert_eq!(a.source_ids, b.source_ids);
            assert_eq!(a.target_ids, b.target_ids);
        }
    }
}
