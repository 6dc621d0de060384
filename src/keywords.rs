//! Topic labels and keyword lists.

use std::collections::{HashMap, HashSet};

use crate::model::{ExpandedKeyword, TopicId, TopicKeywords};

/// Lookup from the label table's `Topic Number` to `Topic Name`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopicLabels {
    names: HashMap<String, String>,
}

impl TopicLabels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, number: impl Into<String>, name: impl Into<String>) {
        self.names.insert(number.into(), name.into());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Label for `topic`, matched exactly as `"Topic <n>"`. Falls back to that same
    /// string when the table has no entry.
    pub fn name_for(&self, topic: TopicId) -> String {
        let key = topic.label_key();
        match self.names.get(&key) {
            Some(name) => name.clone(),
            None => key,
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TopicLabels {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut labels = TopicLabels::new();
        for (k, v) in iter {
            labels.insert(k, v);
        }
        labels
    }
}

/// Builds base keyword entries from ranked NMF words, naming each topic from `labels`.
pub fn base_topics(ranked: &[(TopicId, Vec<String>)], labels: &TopicLabels) -> Vec<TopicKeywords> {
    ranked
        .iter()
        .map(|(id, words)| TopicKeywords {
            id: *id,
            name: labels.name_for(*id),
            keywords: words.clone(),
        })
        .collect()
}

/// Appends expanded words to their base topic, skipping words already present.
///
/// Matching is case-sensitive. Base order is kept, new words follow in the order
/// they appear in `expanded`. Rows for topics without a base entry are ignored.
pub fn merge_keywords(base: &[TopicKeywords], expanded: &[ExpandedKeyword]) -> Vec<TopicKeywords> {
    let mut merged: Vec<TopicKeywords> = Vec::with_capacity(base.len());
    let mut seen: Vec<HashSet<String>> = Vec::with_capacity(base.len());
    let mut by_id: HashMap<TopicId, usize> = HashMap::new();

    for topic in base {
        let mut words = HashSet::new();
        let keywords = topic
            .keywords
            .iter()
            .filter(|w| words.insert(w.to_string()))
            .cloned()
            .collect();
        by_id.entry(topic.id).or_insert(merged.len());
        merged.push(TopicKeywords {
            id: topic.id,
            name: topic.name.clone(),
            keywords,
        });
        seen.push(words);
    }

    for row in expanded {
        let Some(&slot) = by_id.get(&row.topic) else {
            continue;
        };
        if seen[slot].insert(row.word.clone()) {
            merged[slot].keywords.push(row.word.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(n: usize) -> TopicId {
        TopicId::new(n).unwrap()
    }

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn row(n: usize, word: &str) -> ExpandedKeyword {
        ExpandedKeyword {
            topic: topic(n),
            word: word.to_string(),
        }
    }

    #[test]
    fn label_lookup_and_fallback() {
        let labels: TopicLabels = [("Topic 1", "Sea Voyages"), ("Topic_2", "Wrong Key")]
            .into_iter()
            .collect();
        assert_eq!(labels.name_for(topic(1)), "Sea Voyages");
        assert_eq!(labels.name_for(topic(2)), "Topic 2");
        assert_eq!(labels.name_for(topic(13)), "Topic 13");
    }

    #[test]
    fn merge_appends_new_words_in_order() {
        let labels = TopicLabels::new();
        let base = base_topics(
            &[
                (topic(1), words(&["sea", "ship", "sea"])),
                (topic(2), words(&["war"])),
            ],
            &labels,
        );
        let expanded = vec![
            row(1, "wave"),
            row(1, "ship"),
            row(2, "army"),
            row(1, "Sea"),
            row(1, "wave"),
            row(9, "orphan"),
        ];
        let merged = merge_keywords(&base, &expanded);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].keywords, words(&["sea", "ship", "wave", "Sea"]));
        assert_eq!(merged[1].keywords, words(&["war", "army"]));
        assert_eq!(merged[0].name, "Topic 1");
    }

    #[test]
    fn merged_lists_have_no_duplicates() {
        let base = base_topics(&[(topic(3), words(&["a", "b"]))], &TopicLabels::new());
        let expanded: Vec<_> = ["b", "c", "a", "c", "d"].iter().map(|w| row(3, w)).collect();
        let merged = merge_keywords(&base, &expanded);
        let kw = &merged[0].keywords;
        let unique: HashSet<&String> = kw.iter().collect();
        assert_eq!(unique.len(), kw.len());
        assert_eq!(kw, &words(&["a", "b", "c", "d"]));
    }
}
