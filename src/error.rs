//! Error types for loading and exporting.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The four input tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    TopicLabels,
    NmfTopics,
    DocumentTopics,
    ExpandedWordlist,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Source::TopicLabels => "topic labels",
            Source::NmfTopics => "NMF topics",
            Source::DocumentTopics => "document topics",
            Source::ExpandedWordlist => "expanded wordlist",
        };
        f.write_str(name)
    }
}

/// One table that could not be read.
#[derive(Debug, Error)]
#[error("{source_table} ({}): {cause}", .path.display())]
pub struct SourceFailure {
    pub source_table: Source,
    pub path: PathBuf,
    pub cause: csv::Error,
}

/// Every table that failed during a load. Any failure aborts the whole load.
#[derive(Debug, Error)]
#[error("failed to load {} data source(s){}", .failures.len(), describe(.failures))]
pub struct LoadError {
    pub failures: Vec<SourceFailure>,
}

fn describe(failures: &[SourceFailure]) -> String {
    failures.iter().map(|f| format!("; {f}")).collect()
}

impl LoadError {
    pub fn sources(&self) -> impl Iterator<Item = Source> + '_ {
        self.failures.iter().map(|f| f.source_table)
    }
}

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Export failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_lists_each_source() {
        let missing = |source_table, path: &str| SourceFailure {
            source_table,
            path: PathBuf::from(path),
            cause: csv::Error::from(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "not found",
            )),
        };
        let err = LoadError {
            failures: vec![
                missing(Source::TopicLabels, "labels.csv"),
                missing(Source::ExpandedWordlist, "words.csv"),
            ],
        };
        let text = err.to_string();
        assert!(text.starts_with("failed to load 2 data source(s)"));
        assert!(text.contains("topic labels (labels.csv)"));
        assert!(text.contains("expanded wordlist (words.csv)"));
        assert_eq!(err.sources().count(), 2);
    }
}
