//! Per-year topic distributions and the per-topic time series built from them.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{DocumentRecord, TopicDistribution, TopicId, YearAggregate};
use crate::normalize::normalize;

/// Groups documents by year and averages their normalized distributions.
///
/// Documents without a year are skipped. `normalized` is the dataset-wide flag
/// from [`crate::normalize::needs_normalization`].
pub fn aggregate_by_year(
    docs: &[DocumentRecord],
    normalized: bool,
) -> BTreeMap<i32, YearAggregate> {
    let mut sums: BTreeMap<i32, (usize, TopicDistribution)> = BTreeMap::new();
    for doc in docs {
        let Some(year) = doc.year else {
            continue;
        };
        let entry = sums
            .entry(year)
            .or_insert_with(|| (0, TopicDistribution::zero()));
        entry.0 += 1;
        entry.1 += &normalize(doc, normalized);
    }

    sums.into_iter()
        .map(|(year, (count, sum))| {
            (
                year,
                YearAggregate {
                    year,
                    document_count: count,
                    mean_distribution: sum.mean_over(count),
                },
            )
        })
        .collect()
}

/// Mean share of one topic across the observed years.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicSeries {
    pub topic: TopicId,
    pub points: Vec<(i32, f64)>,
}

/// Transposes yearly aggregates into one ascending series per topic.
pub fn topic_series(yearly: &BTreeMap<i32, YearAggregate>) -> Vec<TopicSeries> {
    TopicId::all()
        .map(|topic| TopicSeries {
            topic,
            points: yearly
                .values()
                .map(|agg| (agg.year, agg.mean_distribution[topic]))
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(year: Option<i32>, weights: &[f64]) -> DocumentRecord {
        let mut d = DocumentRecord {
            author: Some("A".to_string()),
            year,
            ..Default::default()
        };
        for (slot, w) in d.weights.iter_mut().zip(weights) {
            *slot = Some(*w);
        }
        d
    }

    #[test]
    fn mean_per_year_without_normalization() {
        let docs = vec![doc(Some(1950), &[0.6, 0.4]), doc(Some(1950), &[0.3, 0.3])];
        let yearly = aggregate_by_year(&docs, false);
        let agg = &yearly[&1950];
        assert_eq!(agg.document_count, 2);
        assert!((agg.mean_distribution.0[0] - 0.45).abs() < 1e-12);
        assert!((agg.mean_distribution.0[1] - 0.35).abs() < 1e-12);
        assert!(agg.mean_distribution.0[2..].iter().all(|v| *v == 0.0));
    }

    #[test]
    fn undated_documents_are_skipped() {
        let docs = vec![
            doc(Some(1901), &[1.0]),
            doc(None, &[1.0]),
            doc(Some(1902), &[0.5, 0.5]),
            doc(Some(1901), &[0.0, 1.0]),
        ];
        let yearly = aggregate_by_year(&docs, false);
        let keys: Vec<i32> = yearly.keys().copied().collect();
        assert_eq!(keys, vec![1901, 1902]);
        let counted: usize = yearly.values().map(|a| a.document_count).sum();
        assert_eq!(counted, 3);
    }

    #[test]
    fn weightless_document_still_counts() {
        let docs = vec![doc(Some(1960), &[1.0]), DocumentRecord {
            year: Some(1960),
            ..Default::default()
        }];
        let yearly = aggregate_by_year(&docs, true);
        let agg = &yearly[&1960];
        assert_eq!(agg.document_count, 2);
        assert!((agg.mean_distribution.0[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn series_follow_years() {
        let docs = vec![doc(Some(1990), &[1.0]), doc(Some(1980), &[0.0, 1.0])];
        let series = topic_series(&aggregate_by_year(&docs, false));
        assert_eq!(series.len(), crate::model::TOPIC_COUNT);
        assert_eq!(series[0].points, vec![(1980, 0.0), (1990, 1.0)]);
        assert_eq!(series[1].points, vec![(1980, 1.0), (1990, 0.0)]);
    }
}
