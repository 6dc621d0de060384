//! Data-quality logging for a finished atlas. Aggregators themselves never log.

use log::{debug, info, warn};

use crate::atlas::TopicAtlas;

/// Allowed distance of a normalized mean distribution's total from 1.0.
pub const DRIFT_TOLERANCE: f64 = 1e-6;

/// Authors whose mean distribution does not sum to 1.0 although normalization
/// was applied, with the observed total.
///
/// Authors with weightless documents legitimately fall short; this only reports.
pub fn author_drift(atlas: &TopicAtlas) -> Vec<(&str, f64)> {
    if !atlas.normalization.needed {
        return Vec::new();
    }
    atlas
        .authors
        .iter()
        .map(|a| (a.name.as_str(), a.mean_distribution.total()))
        .filter(|(_, total)| (total - 1.0).abs() > DRIFT_TOLERANCE)
        .collect()
}

/// Emits the dataset's data-quality events through `log`.
pub fn report(atlas: &TopicAtlas) {
    let check = &atlas.normalization;
    info!(
        "Normalization {}: mean topic-weight sum {:.4} over {} sampled documents",
        if check.needed { "applied" } else { "skipped" },
        check.sample_mean,
        check.sample_size
    );
    info!(
        "Aggregated {} documents into {} years, {} decades, {} ranked authors",
        atlas.document_count,
        atlas.yearly.len(),
        atlas.decades.len(),
        atlas.authors.len()
    );

    let undated = atlas.document_count - atlas.dated_documents();
    if undated > 0 {
        debug!("{undated} documents without a year were left out of yearly aggregates");
    }
    let anonymous = atlas.document_count - atlas.attributed_documents;
    if anonymous > 0 {
        debug!("{anonymous} documents without an author were left out of author aggregates");
    }
    for (name, total) in author_drift(atlas) {
        warn!("Mean distribution for author {name:?} sums to {total:.6}, expected 1.0");
    }
    debug!("{} topic links in network", atlas.network.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::BuildOptions;
    use crate::loader::RawTables;
    use crate::model::DocumentRecord;

    fn doc(author: &str, weights: &[f64]) -> DocumentRecord {
        let mut d = DocumentRecord {
            author: Some(author.to_string()),
            ..Default::default()
        };
        for (slot, w) in d.weights.iter_mut().zip(weights) {
            *slot = Some(*w);
        }
        d
    }

    #[test]
    fn drift_flags_weightless_documents() {
        let tables = RawTables {
            documents: vec![doc("Kept", &[0.2, 0.3]), doc("Empty", &[]), doc("Kept", &[0.1])],
            ..Default::default()
        };
        let atlas = TopicAtlas::build(&tables, &BuildOptions::default());
        assert!(atlas.normalization.needed);
        let drift = author_drift(&atlas);
        assert_eq!(drift.len(), 1);
        assert_eq!(drift[0].0, "Empty");
        assert_eq!(drift[0].1, 0.0);
        report(&atlas);
    }

    #[test]
    fn no_drift_without_normalization() {
        let tables = RawTables {
            documents: vec![doc("Raw", &[3.0])],
            ..Default::default()
        };
        let atlas = TopicAtlas::build(&tables, &BuildOptions::default());
        assert!(author_drift(&atlas).is_empty());
    }
}
