#![forbid(unsafe_code)]
//! # Topic Atlas CLI
//!
//! Command-line front end for the `topic_atlas` crate. Reads the CSV output of
//! a topic-modeling run from a directory, prints a summary and exports the
//! derived datasets for a renderer.
//!
//! ## Example
//! ```bash
//! cargo run --release -- path/to/data --top-authors 15 --export-format json --out-dir out
//! ```
//!
//! Set `RUST_LOG=info` (or `debug`) to see data-quality diagnostics.

use clap::Parser;
use log::error;
use std::path::PathBuf;
use std::process;
use topic_atlas::{AtlasOptions, BuildOptions, ExportFormat, SourceFiles, analyze_dir};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Directory holding the four CSV tables
    data_dir: PathBuf,

    /// Topic label table (Topic Number, Topic Name)
    #[arg(long, default_value = "topic_labels.csv")]
    labels: String,

    /// Ranked NMF keywords, one row per topic after a header row
    #[arg(long, default_value = "nmf_topics.csv")]
    topics: String,

    /// Per-document topic weights
    #[arg(long, default_value = "document_topics.csv")]
    documents: String,

    /// Expanded keyword list, topic identifier in the first column
    #[arg(long, default_value = "expanded_wordlist.csv")]
    wordlist: String,

    /// Number of authors to rank
    #[arg(long, default_value_t = 10)]
    top_authors: usize,

    /// Minimum absolute correlation for a topic link
    #[arg(long, default_value_t = 0.3)]
    network_threshold: f64,

    /// Output format for export (txt, csv, tsv, json)
    #[arg(long, default_value = "txt")]
    export_format: ExportFormat,

    /// Directory the exported files are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let options = AtlasOptions {
        files: SourceFiles {
            labels: cli.labels,
            topics: cli.topics,
            documents: cli.documents,
            wordlist: cli.wordlist,
        },
        build: BuildOptions {
            top_authors: cli.top_authors,
            network_threshold: cli.network_threshold,
        },
        export_format: cli.export_format,
        out_dir: cli.out_dir,
    };

    match analyze_dir(&cli.data_dir, &options) {
        Ok(report) => {
            println!("{}", report.result);
            for path in &report.written {
                println!("Wrote {}", path.display());
            }
        }
        Err(e) => {
            error!("Error: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
