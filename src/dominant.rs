//! Document counts per dominant topic.

use serde::Serialize;

use crate::model::{DocumentRecord, TOPIC_COUNT, TopicId};

/// Number of documents whose `Dominant_Topic` names `topic`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DominantTopicCount {
    pub topic: TopicId,
    pub documents: usize,
}

/// Number of documents per `Dominant_Topic` value, for every topic in ascending order.
///
/// Values are parsed like wordlist identifiers (`"3"`, `"Topic_3"`); absent or
/// unparseable values are skipped.
pub fn dominant_topic_counts(docs: &[DocumentRecord]) -> Vec<DominantTopicCount> {
    let mut counts = [0usize; TOPIC_COUNT];
    for topic in docs
        .iter()
        .filter_map(|d| d.dominant_topic.as_deref())
        .filter_map(TopicId::parse_identifier)
    {
        counts[topic.index()] += 1;
    }
    TopicId::all()
        .map(|topic| DominantTopicCount {
            topic,
            documents: counts[topic.index()],
        })
        .collect()
}
