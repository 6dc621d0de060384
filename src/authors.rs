//! Ranks authors by output and averages their topic distributions.

use std::collections::{HashMap, HashSet};

use crate::model::{AuthorAggregate, DocumentRecord, TopicDistribution};
use crate::normalize::normalize;

#[derive(Default)]
struct AuthorState<'a> {
    document_count: usize,
    titles: HashSet<&'a str>,
    sum: TopicDistribution,
}

/// Returns up to `n` authors ordered by document count, most prolific first.
///
/// Authors with equal counts keep the order in which they were first seen.
/// Documents with an absent or blank author are skipped.
pub fn top_authors(docs: &[DocumentRecord], n: usize, normalized: bool) -> Vec<AuthorAggregate> {
    let mut order: Vec<(&str, AuthorState<'_>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for doc in docs {
        let Some(name) = doc.author_name() else {
            continue;
        };
        let slot = *index.entry(name).or_insert_with(|| {
            order.push((name, AuthorState::default()));
            order.len() - 1
        });
        let state = &mut order[slot].1;
        state.document_count += 1;
        if let Some(title) = doc.title.as_deref() {
            state.titles.insert(title);
        }
        state.sum += &normalize(doc, normalized);
    }

    let mut authors: Vec<AuthorAggregate> = order
        .into_iter()
        .map(|(name, state)| AuthorAggregate {
            name: name.to_string(),
            document_count: state.document_count,
            distinct_book_count: state.titles.len(),
            mean_distribution: state.sum.mean_over(state.document_count),
        })
        .collect();
    // stable: ties stay in encounter order
    authors.sort_by(|a, b| b.document_count.cmp(&a.document_count));
    authors.truncate(n);
    authors
}
