//! Writes the atlas datasets to disk for the renderer.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::prelude::*;
use clap::ValueEnum;
use csv::WriterBuilder;
use log::info;
use serde::Serialize;

use crate::atlas::TopicAtlas;
use crate::error::AtlasError;
use crate::model::{TopicDistribution, TopicId};

/// Output format for exported datasets. `Txt` writes the plain-text summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Txt,
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    /// File extension used for this format.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }

    fn delimiter(self) -> u8 {
        match self {
            ExportFormat::Tsv => b'\t',
            _ => b',',
        }
    }
}

/// Prefixes cells that spreadsheets would evaluate as formulas.
pub fn csv_safe_cell(value: &str) -> String {
    match value.chars().next() {
        Some('=' | '+' | '-' | '@' | '\t' | '\r') => format!("'{value}"),
        _ => value.to_string(),
    }
}

/// Writes every dataset of `atlas` into `out_dir` and returns the created paths.
///
/// Files are named `atlas_<YYYYMMDD_HHMMSS>_<dataset>.<ext>`. `Txt` writes the
/// summary only.
pub fn export_atlas(
    atlas: &TopicAtlas,
    format: ExportFormat,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, AtlasError> {
    fs::create_dir_all(out_dir)?;
    let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let path_for = |dataset: &str| {
        out_dir.join(format!("atlas_{stamp}_{dataset}.{}", format.extension()))
    };

    let written = match format {
        ExportFormat::Txt => {
            let path = path_for("summary");
            let mut file = fs::File::create(&path)?;
            file.write_all(atlas.summary().as_bytes())?;
            vec![path]
        }
        ExportFormat::Json => export_json(atlas, path_for)?,
        ExportFormat::Csv | ExportFormat::Tsv => export_tables(atlas, format.delimiter(), path_for)?,
    };
    info!("Wrote {} file(s) to {}", written.len(), out_dir.display());
    Ok(written)
}

fn write_json<T: Serialize + ?Sized>(path: PathBuf, value: &T) -> Result<PathBuf, AtlasError> {
    let file = fs::File::create(&path)?;
    serde_json::to_writer_pretty(file, value)?;
    Ok(path)
}

fn export_json(
    atlas: &TopicAtlas,
    path_for: impl Fn(&str) -> PathBuf,
) -> Result<Vec<PathBuf>, AtlasError> {
    let yearly: Vec<_> = atlas.yearly.values().collect();
    Ok(vec![
        write_json(path_for("yearly"), &yearly)?,
        write_json(path_for("series"), &atlas.series)?,
        write_json(path_for("authors"), &atlas.authors)?,
        write_json(path_for("decades"), &atlas.decades)?,
        write_json(path_for("correlation"), &atlas.correlation)?,
        write_json(path_for("network"), &atlas.network)?,
        write_json(path_for("keywords"), &atlas.keywords)?,
        write_json(path_for("dominant"), &atlas.dominant_counts)?,
    ])
}

fn topic_columns() -> impl Iterator<Item = String> {
    TopicId::all().map(TopicId::key)
}

fn distribution_cells(d: &TopicDistribution) -> impl Iterator<Item = String> + '_ {
    d.0.iter().map(|v| v.to_string())
}

fn write_table(
    path: PathBuf,
    delimiter: u8,
    header: Vec<String>,
    rows: impl IntoIterator<Item = Vec<String>>,
) -> Result<PathBuf, AtlasError> {
    let mut wtr = WriterBuilder::new().delimiter(delimiter).from_path(&path)?;
    wtr.write_record(&header)?;
    for row in rows {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(path)
}

fn header(fixed: &[&str], with_topics: bool) -> Vec<String> {
    let mut out: Vec<String> = fixed.iter().map(|s| s.to_string()).collect();
    if with_topics {
        out.extend(topic_columns());
    }
    out
}

fn export_tables(
    atlas: &TopicAtlas,
    delimiter: u8,
    path_for: impl Fn(&str) -> PathBuf,
) -> Result<Vec<PathBuf>, AtlasError> {
    let mut written = Vec::new();

    written.push(write_table(
        path_for("yearly"),
        delimiter,
        header(&["year", "document_count"], true),
        atlas.yearly.values().map(|y| {
            let mut row = vec![y.year.to_string(), y.document_count.to_string()];
            row.extend(distribution_cells(&y.mean_distribution));
            row
        }),
    )?);

    written.push(write_table(
        path_for("series"),
        delimiter,
        header(&["topic", "year", "share"], false),
        atlas.series.iter().flat_map(|s| {
            s.points
                .iter()
                .map(move |(year, share)| vec![s.topic.key(), year.to_string(), share.to_string()])
        }),
    )?);

    written.push(write_table(
        path_for("authors"),
        delimiter,
        header(&["name", "document_count", "distinct_book_count"], true),
        atlas.authors.iter().map(|a| {
            let mut row = vec![
                csv_safe_cell(&a.name),
                a.document_count.to_string(),
                a.distinct_book_count.to_string(),
            ];
            row.extend(distribution_cells(&a.mean_distribution));
            row
        }),
    )?);

    written.push(write_table(
        path_for("decades"),
        delimiter,
        header(&["decade", "total_books", "dominant_topic", "dominant_name"], true),
        atlas.decades.iter().map(|d| {
            let mut row = vec![
                d.decade.to_string(),
                d.total_books.to_string(),
                d.dominant_topic.key(),
                csv_safe_cell(atlas.topic_name(d.dominant_topic)),
            ];
            row.extend(distribution_cells(&d.mean_distribution));
            row
        }),
    )?);

    written.push(write_table(
        path_for("correlation"),
        delimiter,
        header(&["topic"], true),
        TopicId::all().map(|t| {
            let mut row = vec![t.key()];
            row.extend(atlas.correlation.values[t.index()].iter().map(|v| v.to_string()));
            row
        }),
    )?);

    written.push(write_table(
        path_for("network"),
        delimiter,
        header(&["source", "target", "correlation"], false),
        atlas.network.iter().map(|l| {
            vec![l.source.key(), l.target.key(), l.correlation.to_string()]
        }),
    )?);

    written.push(write_table(
        path_for("keywords"),
        delimiter,
        header(&["topic", "name", "rank", "keyword"], false),
        atlas.keywords.iter().flat_map(|t| {
            t.keywords.iter().enumerate().map(move |(rank, word)| {
                vec![
                    t.id.key(),
                    csv_safe_cell(&t.name),
                    (rank + 1).to_string(),
                    csv_safe_cell(word),
                ]
            })
        }),
    )?);

    written.push(write_table(
        path_for("dominant"),
        delimiter,
        header(&["topic", "name", "documents"], false),
        atlas.dominant_counts.iter().map(|c| {
            vec![
                c.topic.key(),
                csv_safe_cell(atlas.topic_name(c.topic)),
                c.documents.to_string(),
            ]
        }),
    )?);

    Ok(written)
}
