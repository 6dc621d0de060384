//! Decides whether topic weights must be rescaled and applies the rescaling.

use crate::model::{DocumentRecord, TopicDistribution};

/// Number of leading documents inspected by [`needs_normalization`].
pub const NORMALIZATION_SAMPLE: usize = 100;

/// Sample mean below which weights are treated as unnormalized.
pub const NORMALIZATION_THRESHOLD: f64 = 0.95;

/// Outcome of sampling a dataset, kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationCheck {
    pub sample_size: usize,
    pub sample_mean: f64,
    pub needed: bool,
}

/// Samples the first [`NORMALIZATION_SAMPLE`] documents and reports the mean raw
/// weight sum together with the decision.
pub fn check_normalization(docs: &[DocumentRecord]) -> NormalizationCheck {
    let sample = &docs[..docs.len().min(NORMALIZATION_SAMPLE)];
    if sample.is_empty() {
        return NormalizationCheck {
            sample_size: 0,
            sample_mean: 0.0,
            needed: false,
        };
    }
    let total: f64 = sample.iter().map(DocumentRecord::raw_weight_sum).sum();
    let sample_mean = total / sample.len() as f64;
    NormalizationCheck {
        sample_size: sample.len(),
        sample_mean,
        needed: sample_mean < NORMALIZATION_THRESHOLD,
    }
}

/// True iff the sampled mean raw weight sum is strictly below 0.95.
pub fn needs_normalization(docs: &[DocumentRecord]) -> bool {
    check_normalization(docs).needed
}

/// Normalized distribution of one document.
///
/// With `normalize == false` the raw weights are returned (absent as 0). Otherwise
/// each weight is divided by the document's own sum; a zero sum gives all zeros.
pub fn normalize(doc: &DocumentRecord, normalize: bool) -> TopicDistribution {
    let raw = doc.raw_distribution();
    if !normalize {
        return raw;
    }
    let sum = doc.raw_weight_sum();
    if sum == 0.0 {
        return TopicDistribution::zero();
    }
    raw.scaled(1.0 / sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TOPIC_COUNT;

    fn doc(weights: &[f64]) -> DocumentRecord {
        let mut d = DocumentRecord::default();
        for (slot, w) in d.weights.iter_mut().zip(weights) {
            *slot = Some(*w);
        }
        d
    }

    #[test]
    fn normalized_sums_to_one() {
        let d = doc(&[0.2, 0.1, 0.05, 0.0, 0.15]);
        let n = normalize(&d, true);
        assert!((n.total() - 1.0).abs() < 1e-9);
        assert!((n.0[0] - 0.4).abs() < 1e-12);
    }

    #[test]
    fn zero_sum_stays_zero() {
        let n = normalize(&DocumentRecord::default(), true);
        assert_eq!(n, TopicDistribution::zero());
        assert!(n.0.iter().all(|v| !v.is_nan()));
    }

    #[test]
    fn flag_off_returns_raw() {
        let mut d = doc(&[0.3, 0.3]);
        d.weights[TOPIC_COUNT - 1] = None;
        let n = normalize(&d, false);
        assert_eq!(n.0[0], 0.3);
        assert_eq!(n.0[TOPIC_COUNT - 1], 0.0);
    }

    #[test]
    fn threshold_boundary_is_exclusive() {
        // sums to 0.9375 exactly
        let below = doc(&[0.5, 0.25, 0.125, 0.0625]);
        assert!(needs_normalization(&[below]));
        let at_threshold = DocumentRecord {
            weights: {
                let mut w = [None; TOPIC_COUNT];
                w[0] = Some(NORMALIZATION_THRESHOLD);
                w
            },
            ..Default::default()
        };
        assert!(!needs_normalization(&[at_threshold]));
        assert!(!needs_normalization(&[doc(&[0.6, 0.4])]));
    }

    #[test]
    fn only_first_hundred_documents_are_sampled() {
        let mut docs = vec![doc(&[1.0]); NORMALIZATION_SAMPLE];
        docs.extend(vec![doc(&[0.0]); 500]);
        let check = check_normalization(&docs);
        assert_eq!(check.sample_size, NORMALIZATION_SAMPLE);
        assert!(!check.needed);

        let mut low_first = vec![doc(&[0.1]); NORMALIZATION_SAMPLE];
        low_first.extend(vec![doc(&[1.0]); 500]);
        assert!(needs_normalization(&low_first));
    }

    #[test]
    fn empty_dataset_does_not_normalize() {
        let check = check_normalization(&[]);
        assert_eq!(check.sample_size, 0);
        assert!(!check.needed);
    }
}
