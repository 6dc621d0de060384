//! Pearson correlation between topics across documents, and the topic network
//! derived from it.

use rayon::prelude::*;
use serde::Serialize;

use crate::model::{DocumentRecord, TOPIC_COUNT, TopicDistribution, TopicId};
use crate::normalize::normalize;

/// Symmetric topic-by-topic correlation matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub values: [[f64; TOPIC_COUNT]; TOPIC_COUNT],
}

impl CorrelationMatrix {
    pub fn get(&self, a: TopicId, b: TopicId) -> f64 {
        self.values[a.index()][b.index()]
    }
}

/// Population correlation matrix over the normalized document vectors.
///
/// An entry is 0 when either topic has zero variance. The upper triangle is
/// computed and mirrored, so the matrix is exactly symmetric.
pub fn correlation_matrix(docs: &[DocumentRecord], normalized: bool) -> CorrelationMatrix {
    let mut values = [[0.0; TOPIC_COUNT]; TOPIC_COUNT];
    if docs.is_empty() {
        return CorrelationMatrix { values };
    }

    let vectors: Vec<TopicDistribution> = docs
        .par_iter()
        .map(|doc| normalize(doc, normalized))
        .collect();
    let n = vectors.len() as f64;

    let mut means = TopicDistribution::zero();
    for v in &vectors {
        means += v;
    }
    let means = means.scaled(1.0 / n);

    let pairs: Vec<(usize, usize)> = (0..TOPIC_COUNT)
        .flat_map(|i| (i..TOPIC_COUNT).map(move |j| (i, j)))
        .collect();
    let covariances: Vec<f64> = pairs
        .par_iter()
        .map(|&(i, j)| {
            vectors
                .iter()
                .map(|v| (v.0[i] - means.0[i]) * (v.0[j] - means.0[j]))
                .sum::<f64>()
                / n
        })
        .collect();

    let mut cov = [[0.0; TOPIC_COUNT]; TOPIC_COUNT];
    for (&(i, j), &c) in pairs.iter().zip(&covariances) {
        cov[i][j] = c;
        cov[j][i] = c;
    }

    // A column whose values are all equal has zero variance even when its float
    // mean is inexact.
    let std: Vec<Option<f64>> = (0..TOPIC_COUNT)
        .map(|i| {
            let first = vectors[0].0[i];
            let varies = vectors.iter().any(|v| v.0[i] != first);
            (varies && cov[i][i] > 0.0).then(|| cov[i][i].sqrt())
        })
        .collect();

    for &(i, j) in &pairs {
        let (Some(si), Some(sj)) = (std[i], std[j]) else {
            continue;
        };
        let r = if i == j {
            1.0
        } else {
            (cov[i][j] / (si * sj)).clamp(-1.0, 1.0)
        };
        values[i][j] = r;
        values[j][i] = r;
    }
    CorrelationMatrix { values }
}

/// Edge between two correlated topics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicLink {
    pub source: TopicId,
    pub target: TopicId,
    pub correlation: f64,
}

/// Topic pairs whose absolute correlation reaches `threshold`, ordered by
/// `(source, target)`.
pub fn topic_network(matrix: &CorrelationMatrix, threshold: f64) -> Vec<TopicLink> {
    let mut links = Vec::new();
    for source in TopicId::all() {
        for target in TopicId::all().filter(|t| *t > source) {
            let correlation = matrix.get(source, target);
            if correlation != 0.0 && correlation.abs() >= threshold {
                links.push(TopicLink {
                    source,
                    target,
                    correlation,
                });
            }
        }
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(weights: &[f64]) -> DocumentRecord {
        let mut d = DocumentRecord::default();
        for (slot, w) in d.weights.iter_mut().zip(weights) {
            *slot = Some(*w);
        }
        d
    }

    fn sample() -> Vec<DocumentRecord> {
        vec![
            doc(&[0.7, 0.1, 0.2]),
            doc(&[0.2, 0.5, 0.3]),
            doc(&[0.1, 0.6, 0.3]),
            doc(&[0.5, 0.2, 0.3]),
            doc(&[0.3, 0.3, 0.1, 0.3]),
        ]
    }

    #[test]
    fn symmetric_bounded_unit_diagonal() {
        let m = correlation_matrix(&sample(), false);
        for i in 0..TOPIC_COUNT {
            for j in 0..TOPIC_COUNT {
                assert_eq!(m.values[i][j].to_bits(), m.values[j][i].to_bits());
                assert!((-1.0..=1.0).contains(&m.values[i][j]));
            }
        }
        for i in 0..4 {
            assert_eq!(m.values[i][i], 1.0);
        }
        // topics 5..=13 never vary
        assert_eq!(m.values[6][6], 0.0);
        assert!(m.values[0][1] < -0.9);
    }

    #[test]
    fn constant_topic_yields_zero() {
        let docs = vec![doc(&[0.1, 0.2]), doc(&[0.1, 0.7]), doc(&[0.1, 0.4])];
        let m = correlation_matrix(&docs, false);
        assert_eq!(m.values[0][1], 0.0);
        assert_eq!(m.values[1][0], 0.0);
        assert_eq!(m.values[0][0], 0.0);
        assert_eq!(m.values[1][1], 1.0);
        assert!(m.values.iter().flatten().all(|v| !v.is_nan()));
    }

    #[test]
    fn perfectly_linear_topics() {
        let docs = vec![doc(&[0.1, 0.2]), doc(&[0.2, 0.4]), doc(&[0.3, 0.6])];
        let m = correlation_matrix(&docs, false);
        assert!((m.values[0][1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn tiny_variance_still_correlates() {
        let docs = vec![
            doc(&[0.5, 0.5]),
            doc(&[0.5 + 2e-8, 0.5 - 2e-8]),
            doc(&[0.5 - 2e-8, 0.5 + 2e-8]),
        ];
        let m = correlation_matrix(&docs, false);
        assert_eq!(m.values[0][0], 1.0);
        assert_eq!(m.values[1][1], 1.0);
        assert!((m.values[0][1] + 1.0).abs() < 1e-6);
        assert_eq!(m.values[0][1].to_bits(), m.values[1][0].to_bits());
    }

    #[test]
    fn empty_corpus_is_all_zero() {
        let m = correlation_matrix(&[], true);
        assert!(m.values.iter().flatten().all(|v| *v == 0.0));
    }

    #[test]
    fn network_filters_by_threshold() {
        let m = correlation_matrix(&sample(), false);
        let links = topic_network(&m, 0.5);
        assert!(!links.is_empty());
        assert!(links.iter().all(|l| l.source < l.target));
        assert!(links.iter().all(|l| l.correlation.abs() >= 0.5));
        assert!(links
            .iter()
            .any(|l| l.source.number() == 1 && l.target.number() == 2));
        assert!(topic_network(&m, 1.1).is_empty());
    }
}
