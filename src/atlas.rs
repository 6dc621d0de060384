//! The full set of derived datasets for one load.

use std::collections::BTreeMap;

use crate::authors::top_authors;
use crate::correlation::{CorrelationMatrix, TopicLink, correlation_matrix, topic_network};
use crate::decades::aggregate_by_decade;
use crate::dominant::{DominantTopicCount, dominant_topic_counts};
use crate::keywords::{base_topics, merge_keywords};
use crate::loader::RawTables;
use crate::model::{AuthorAggregate, DecadeAggregate, TopicId, TopicKeywords, YearAggregate};
use crate::normalize::{NormalizationCheck, check_normalization};
use crate::yearly::{TopicSeries, aggregate_by_year, topic_series};

/// Knobs for [`TopicAtlas::build`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildOptions {
    pub top_authors: usize,
    pub network_threshold: f64,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            top_authors: 10,
            network_threshold: 0.3,
        }
    }
}

/// Derived datasets, immutable once built. A new load builds a new atlas.
#[derive(Debug, Clone)]
pub struct TopicAtlas {
    pub normalization: NormalizationCheck,
    pub document_count: usize,
    pub attributed_documents: usize,
    pub topic_names: Vec<String>,
    pub yearly: BTreeMap<i32, YearAggregate>,
    pub series: Vec<TopicSeries>,
    pub authors: Vec<AuthorAggregate>,
    pub decades: Vec<DecadeAggregate>,
    pub correlation: CorrelationMatrix,
    pub network: Vec<TopicLink>,
    pub keywords: Vec<TopicKeywords>,
    pub dominant_counts: Vec<DominantTopicCount>,
}

impl TopicAtlas {
    /// Runs every aggregator over `tables`.
    ///
    /// The normalization decision is made once here and handed to each aggregator.
    pub fn build(tables: &RawTables, options: &BuildOptions) -> Self {
        let docs = &tables.documents;
        let normalization = check_normalization(docs);
        let normalized = normalization.needed;

        let yearly = aggregate_by_year(docs, normalized);
        let correlation = correlation_matrix(docs, normalized);
        let base = base_topics(&tables.ranked_keywords, &tables.labels);

        TopicAtlas {
            normalization,
            document_count: docs.len(),
            attributed_documents: docs.iter().filter(|d| d.author_name().is_some()).count(),
            topic_names: TopicId::all().map(|t| tables.labels.name_for(t)).collect(),
            series: topic_series(&yearly),
            decades: aggregate_by_decade(&yearly),
            authors: top_authors(docs, options.top_authors, normalized),
            network: topic_network(&correlation, options.network_threshold),
            keywords: merge_keywords(&base, &tables.expanded),
            dominant_counts: dominant_topic_counts(docs),
            yearly,
            correlation,
        }
    }

    pub fn topic_name(&self, topic: TopicId) -> &str {
        &self.topic_names[topic.index()]
    }

    /// Documents that carry a year.
    pub fn dated_documents(&self) -> usize {
        self.yearly.values().map(|y| y.document_count).sum()
    }

    /// Plain-text overview of the atlas.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Documents: {} ({} dated, {} attributed)\n",
            self.document_count,
            self.dated_documents(),
            self.attributed_documents
        ));
        out.push_str(&format!(
            "Normalization: {} (sample of {}, mean weight sum {:.4})\n",
            if self.normalization.needed { "applied" } else { "not needed" },
            self.normalization.sample_size,
            self.normalization.sample_mean
        ));
        if let (Some(first), Some(last)) = (self.yearly.keys().next(), self.yearly.keys().last()) {
            out.push_str(&format!(
                "Years: {first}-{last} ({} distinct)\n",
                self.yearly.len()
            ));
        }

        out.push_str("\nTop authors:\n");
        for (rank, author) in self.authors.iter().enumerate() {
            out.push_str(&format!(
                "{:>3}. {} - {} documents, {} books, leaning {}\n",
                rank + 1,
                author.name,
                author.document_count,
                author.distinct_book_count,
                self.topic_name(author.mean_distribution.dominant())
            ));
        }

        out.push_str("\nDecades:\n");
        for decade in &self.decades {
            out.push_str(&format!(
                "  {}s: {} books, dominant {}\n",
                decade.decade,
                decade.total_books,
                self.topic_name(decade.dominant_topic)
            ));
        }

        out.push_str("\nTopic links:\n");
        for link in &self.network {
            out.push_str(&format!(
                "  {} <-> {}: {:+.3}\n",
                self.topic_name(link.source),
                self.topic_name(link.target),
                link.correlation
            ));
        }

        out.push_str("\nKeywords:\n");
        for topic in &self.keywords {
            out.push_str(&format!(
                "  {} ({}): {}\n",
                topic.id,
                topic.name,
                topic.keywords.join(", ")
            ));
        }
        out
    }
}
