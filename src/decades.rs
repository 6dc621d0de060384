//! Buckets yearly aggregates into decades.

use std::collections::BTreeMap;

use crate::model::{DecadeAggregate, TopicDistribution, YearAggregate};

/// Decade containing `year`, e.g. 1987 -> 1980.
pub fn decade_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

/// Weighted decade means, ascending by decade.
///
/// Each year contributes `document_count * mean_distribution`; the sum is divided
/// by the decade's total document count.
pub fn aggregate_by_decade(yearly: &BTreeMap<i32, YearAggregate>) -> Vec<DecadeAggregate> {
    let mut buckets: BTreeMap<i32, (usize, TopicDistribution)> = BTreeMap::new();
    for agg in yearly.values() {
        let bucket = buckets
            .entry(decade_of(agg.year))
            .or_insert_with(|| (0, TopicDistribution::zero()));
        bucket.0 += agg.document_count;
        bucket.1 += &agg.mean_distribution.scaled(agg.document_count as f64);
    }

    buckets
        .into_iter()
        .map(|(decade, (total_books, sum))| {
            let mean_distribution = sum.mean_over(total_books);
            DecadeAggregate {
                decade,
                total_books,
                dominant_topic: mean_distribution.dominant(),
                mean_distribution,
            }
        })
        .collect()
}
