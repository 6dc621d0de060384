//! Reads the four CSV tables written by the topic-modeling pipeline.
//!
//! Cells that are empty or fail to parse become absent values; only a table that
//! cannot be opened or read at all is an error.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ByteRecord, ReaderBuilder, StringRecord, Trim};
use log::debug;

use crate::error::{LoadError, Source, SourceFailure};
use crate::keywords::TopicLabels;
use crate::model::{DocumentRecord, ExpandedKeyword, TOPIC_COUNT, TopicId};

/// File names of the input tables, relative to a data directory.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFiles {
    pub labels: String,
    pub topics: String,
    pub documents: String,
    pub wordlist: String,
}

impl Default for SourceFiles {
    fn default() -> Self {
        SourceFiles {
            labels: "topic_labels.csv".to_string(),
            topics: "nmf_topics.csv".to_string(),
            documents: "document_topics.csv".to_string(),
            wordlist: "expanded_wordlist.csv".to_string(),
        }
    }
}

/// Everything the aggregators need, as parsed from disk.
#[derive(Debug, Clone, Default)]
pub struct RawTables {
    pub labels: TopicLabels,
    pub ranked_keywords: Vec<(TopicId, Vec<String>)>,
    pub documents: Vec<DocumentRecord>,
    pub expanded: Vec<ExpandedKeyword>,
}

/// Loads all four tables from `dir`.
///
/// Every table is attempted; if any fails, the returned error lists all failures
/// and no partial data is returned.
pub fn load_tables(dir: &Path, files: &SourceFiles) -> Result<RawTables, LoadError> {
    let mut failures = Vec::new();

    let labels = attempt(
        dir,
        &files.labels,
        Source::TopicLabels,
        read_topic_labels,
        &mut failures,
    );
    let ranked = attempt(
        dir,
        &files.topics,
        Source::NmfTopics,
        read_nmf_topics,
        &mut failures,
    );
    let documents = attempt(
        dir,
        &files.documents,
        Source::DocumentTopics,
        read_documents,
        &mut failures,
    );
    let expanded = attempt(
        dir,
        &files.wordlist,
        Source::ExpandedWordlist,
        read_expanded_wordlist,
        &mut failures,
    );

    match (labels, ranked, documents, expanded) {
        (Some(labels), Some(ranked_keywords), Some(documents), Some(expanded)) => Ok(RawTables {
            labels,
            ranked_keywords,
            documents,
            expanded,
        }),
        _ => Err(LoadError { failures }),
    }
}

fn attempt<T>(
    dir: &Path,
    name: &str,
    source_table: Source,
    read: fn(File) -> Result<T, csv::Error>,
    failures: &mut Vec<SourceFailure>,
) -> Option<T> {
    let path: PathBuf = dir.join(name);
    let result = File::open(&path)
        .map_err(csv::Error::from)
        .and_then(read);
    match result {
        Ok(table) => {
            debug!("Loaded {} from {}", source_table, path.display());
            Some(table)
        }
        Err(cause) => {
            failures.push(SourceFailure {
                source_table,
                path,
                cause,
            });
            None
        }
    }
}

fn reader<R: Read>(input: R, has_headers: bool) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input)
}

/// Decodes a raw row, replacing invalid UTF-8 instead of failing the table.
fn decode(record: &ByteRecord) -> StringRecord {
    record.iter().map(String::from_utf8_lossy).collect()
}

fn non_empty(cell: Option<&str>) -> Option<&str> {
    cell.filter(|c| !c.is_empty())
}

/// Reads the label table (`Topic Number`, `Topic Name`).
pub fn read_topic_labels<R: Read>(input: R) -> Result<TopicLabels, csv::Error> {
    let mut rdr = reader(input, true);
    let headers = decode(rdr.byte_headers()?);
    let number_col = column(&headers, "Topic Number");
    let name_col = column(&headers, "Topic Name");

    let mut labels = TopicLabels::new();
    for record in rdr.byte_records() {
        let record = decode(&record?);
        let number = non_empty(number_col.and_then(|i| record.get(i)));
        let name = non_empty(name_col.and_then(|i| record.get(i)));
        if let (Some(number), Some(name)) = (number, name) {
            labels.insert(number, name);
        }
    }
    Ok(labels)
}

/// Reads ranked NMF keywords. Row 0 is a header; rows 1..=13 are topics 1..=13.
pub fn read_nmf_topics<R: Read>(input: R) -> Result<Vec<(TopicId, Vec<String>)>, csv::Error> {
    let mut rdr = reader(input, false);
    let mut topics = Vec::with_capacity(TOPIC_COUNT);
    for (i, record) in rdr.byte_records().skip(1).take(TOPIC_COUNT).enumerate() {
        let record = decode(&record?);
        let Some(topic) = TopicId::from_index(i) else {
            break;
        };
        let mut cells = record.iter().peekable();
        if cells.peek().is_some_and(|c| is_index_cell(c, topic)) {
            cells.next();
        }
        let words = cells.filter(|c| !c.is_empty()).map(str::to_string).collect();
        topics.push((topic, words));
    }
    Ok(topics)
}

fn is_index_cell(cell: &str, topic: TopicId) -> bool {
    cell == topic.number().to_string() || cell == topic.label_key() || cell == topic.key()
}

/// Reads one record per document. Columns are located by header name.
pub fn read_documents<R: Read>(input: R) -> Result<Vec<DocumentRecord>, csv::Error> {
    let mut rdr = reader(input, true);
    let headers = decode(rdr.byte_headers()?);
    let author_col = column(&headers, "Author");
    let year_col = column(&headers, "Year");
    let title_col = column(&headers, "Book Title");
    let dominant_col = column(&headers, "Dominant_Topic");
    let weight_cols: Vec<Option<usize>> = TopicId::all()
        .map(|t| column(&headers, &t.key()))
        .collect();

    let mut docs = Vec::new();
    for record in rdr.byte_records() {
        let record = decode(&record?);
        let cell = |col: Option<usize>| non_empty(col.and_then(|i| record.get(i)));

        let mut weights = [None; TOPIC_COUNT];
        for (slot, col) in weights.iter_mut().zip(&weight_cols) {
            *slot = cell(*col).and_then(parse_weight);
        }
        docs.push(DocumentRecord {
            author: cell(author_col).map(str::to_string),
            year: cell(year_col).and_then(parse_year),
            title: cell(title_col).map(str::to_string),
            dominant_topic: cell(dominant_col).map(str::to_string),
            weights,
        });
    }
    Ok(docs)
}

/// Reads `(topic, word)` pairs. Column 0 identifies the topic; rows whose identifier
/// does not parse (such as a header row) are skipped.
pub fn read_expanded_wordlist<R: Read>(input: R) -> Result<Vec<ExpandedKeyword>, csv::Error> {
    let mut rdr = reader(input, false);
    let mut rows = Vec::new();
    for record in rdr.byte_records() {
        let record = decode(&record?);
        let Some(topic) = record.get(0).and_then(TopicId::parse_identifier) else {
            continue;
        };
        rows.extend(
            record
                .iter()
                .skip(1)
                .filter(|w| !w.is_empty())
                .map(|word| ExpandedKeyword {
                    topic,
                    word: word.to_string(),
                }),
        );
    }
    Ok(rows)
}

fn column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

/// Accepts `1950` as well as `1950.0`.
pub(crate) fn parse_year(cell: &str) -> Option<i32> {
    if let Ok(year) = cell.parse::<i32>() {
        return Some(year);
    }
    let value = cell.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= i32::MAX as f64 {
        Some(value as i32)
    } else {
        None
    }
}

fn parse_weight(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|w| w.is_finite())
}
