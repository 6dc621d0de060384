//! # topic_atlas
//!
//! Aggregates the output of an offline topic model (NMF over a literary corpus)
//! into the datasets a visualization front end draws from: yearly and decade
//! topic distributions, the most prolific authors, topic-to-topic correlation
//! and merged keyword lists.
//!
//! All aggregators are pure functions over loaded records. The normalization
//! decision is taken once per dataset by [`normalize::check_normalization`] and
//! passed into each of them.
//!
//! ## Example
//! ```
//! use topic_atlas::{DocumentRecord, aggregate_by_year, needs_normalization};
//!
//! let mut doc = DocumentRecord { year: Some(1950), ..Default::default() };
//! doc.weights[0] = Some(0.6);
//! doc.weights[1] = Some(0.4);
//! let docs = vec![doc];
//!
//! let flag = needs_normalization(&docs);
//! let yearly = aggregate_by_year(&docs, flag);
//! assert_eq!(yearly[&1950].document_count, 1);
//! ```

use std::path::{Path, PathBuf};

pub mod atlas;
pub mod authors;
pub mod correlation;
pub mod decades;
pub mod diagnostics;
pub mod dominant;
pub mod error;
pub mod export;
pub mod keywords;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod yearly;

pub use atlas::{BuildOptions, TopicAtlas};
pub use authors::top_authors;
pub use correlation::{CorrelationMatrix, TopicLink, correlation_matrix, topic_network};
pub use decades::aggregate_by_decade;
pub use dominant::{DominantTopicCount, dominant_topic_counts};
pub use error::{AtlasError, LoadError, Source, SourceFailure};
pub use export::{ExportFormat, csv_safe_cell, export_atlas};
pub use keywords::{TopicLabels, base_topics, merge_keywords};
pub use loader::{RawTables, SourceFiles, load_tables};
pub use model::{
    AuthorAggregate, DecadeAggregate, DocumentRecord, ExpandedKeyword, TOPIC_COUNT,
    TopicDistribution, TopicId, TopicKeywords, YearAggregate,
};
pub use normalize::{needs_normalization, normalize};
pub use yearly::{TopicSeries, aggregate_by_year, topic_series};

/// Options for a full [`analyze_dir`] run.
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasOptions {
    pub files: SourceFiles,
    pub build: BuildOptions,
    pub export_format: ExportFormat,
    pub out_dir: PathBuf,
}

impl Default for AtlasOptions {
    fn default() -> Self {
        AtlasOptions {
            files: SourceFiles::default(),
            build: BuildOptions::default(),
            export_format: ExportFormat::Txt,
            out_dir: PathBuf::from("."),
        }
    }
}

/// Outcome of [`analyze_dir`].
#[derive(Debug)]
pub struct AtlasReport {
    pub atlas: TopicAtlas,
    pub result: String,
    pub written: Vec<PathBuf>,
}

/// Loads the tables from `dir`, builds the atlas, logs diagnostics and exports.
pub fn analyze_dir(dir: &Path, options: &AtlasOptions) -> Result<AtlasReport, AtlasError> {
    let tables = load_tables(dir, &options.files)?;
    let atlas = TopicAtlas::build(&tables, &options.build);
    diagnostics::report(&atlas);
    let written = export_atlas(&atlas, options.export_format, &options.out_dir)?;
    Ok(AtlasReport {
        result: atlas.summary(),
        atlas,
        written,
    })
}
