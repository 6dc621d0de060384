//! Records and derived value types shared by every aggregator.

use std::fmt;
use std::ops::{AddAssign, Index};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Number of topics produced by the upstream factorization.
pub const TOPIC_COUNT: usize = 13;

/// 1-based topic identifier in `1..=TOPIC_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TopicId(u8);

impl TopicId {
    /// Returns `None` for numbers outside `1..=TOPIC_COUNT`.
    pub fn new(number: usize) -> Option<Self> {
        if (1..=TOPIC_COUNT).contains(&number) {
            Some(TopicId(number as u8))
        } else {
            None
        }
    }

    /// Topic for a zero-based slot index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::new(index + 1)
    }

    /// 1-based topic number.
    pub fn number(self) -> usize {
        self.0 as usize
    }

    /// Zero-based slot in a [`TopicDistribution`].
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// All topic ids in ascending order.
    pub fn all() -> impl Iterator<Item = TopicId> {
        (1..=TOPIC_COUNT).map(|n| TopicId(n as u8))
    }

    /// Key used in derived structures, e.g. `Topic_3`.
    pub fn key(self) -> String {
        format!("Topic_{}", self.0)
    }

    /// Form used by the label table, e.g. `Topic 3`.
    pub fn label_key(self) -> String {
        format!("Topic {}", self.0)
    }

    /// Parses a topic identifier: a bare integer, or any string ending in digits
    /// (`"3"`, `"Topic_3"`, `"topic3"`).
    pub fn parse_identifier(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let digits_start = raw
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit())
            .last()
            .map(|(i, _)| i)?;
        raw[digits_start..].parse::<usize>().ok().and_then(Self::new)
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Topic_{}", self.0)
    }
}

impl Serialize for TopicId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Per-topic weights, one slot per topic.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TopicDistribution(pub [f64; TOPIC_COUNT]);

impl TopicDistribution {
    /// All-zero distribution.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Weight of `topic`.
    pub fn get(&self, topic: TopicId) -> f64 {
        self.0[topic.index()]
    }

    /// Sum over all topics.
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Copy with every slot multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        let mut out = *self;
        out.0.iter_mut().for_each(|v| *v *= factor);
        out
    }

    /// Divides every slot by `count`; a zero count leaves the distribution at zero.
    pub fn mean_over(&self, count: usize) -> Self {
        if count == 0 {
            return Self::zero();
        }
        self.scaled(1.0 / count as f64)
    }

    /// Topic with the largest weight; ties go to the lowest id.
    pub fn dominant(&self) -> TopicId {
        let mut best = 0;
        for (i, &v) in self.0.iter().enumerate().skip(1) {
            if v > self.0[best] {
                best = i;
            }
        }
        TopicId(best as u8 + 1)
    }

    /// `(topic, weight)` pairs in ascending topic order.
    pub fn iter(&self) -> impl Iterator<Item = (TopicId, f64)> + '_ {
        TopicId::all().zip(self.0.iter().copied())
    }
}

impl AddAssign<&TopicDistribution> for TopicDistribution {
    fn add_assign(&mut self, rhs: &TopicDistribution) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a += b;
        }
    }
}

impl Index<TopicId> for TopicDistribution {
    type Output = f64;

    fn index(&self, topic: TopicId) -> &f64 {
        &self.0[topic.index()]
    }
}

impl Serialize for TopicDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(TOPIC_COUNT))?;
        for (topic, value) in self.iter() {
            map.serialize_entry(&topic.key(), &value)?;
        }
        map.end()
    }
}

/// One literary work as read from the document-topic table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentRecord {
    pub author: Option<String>,
    pub year: Option<i32>,
    pub title: Option<String>,
    pub dominant_topic: Option<String>,
    pub weights: [Option<f64>; TOPIC_COUNT],
}

impl DocumentRecord {
    /// Sum of the present topic weights.
    pub fn raw_weight_sum(&self) -> f64 {
        self.weights.iter().flatten().sum()
    }

    /// Raw weights with absent fields as 0.
    pub fn raw_distribution(&self) -> TopicDistribution {
        let mut out = TopicDistribution::zero();
        for (slot, w) in out.0.iter_mut().zip(self.weights.iter()) {
            *slot = w.unwrap_or(0.0);
        }
        out
    }

    /// Author name if present and not blank.
    pub fn author_name(&self) -> Option<&str> {
        self.author.as_deref().filter(|a| !a.trim().is_empty())
    }
}

/// Documents published in one year and their mean distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearAggregate {
    pub year: i32,
    pub document_count: usize,
    pub mean_distribution: TopicDistribution,
}

/// One author's output. `distinct_book_count` counts unique titles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorAggregate {
    pub name: String,
    pub document_count: usize,
    pub distinct_book_count: usize,
    pub mean_distribution: TopicDistribution,
}

/// Document-weighted mean of the years in one decade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecadeAggregate {
    pub decade: i32,
    pub total_books: usize,
    pub mean_distribution: TopicDistribution,
    pub dominant_topic: TopicId,
}

/// Keyword list for one topic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicKeywords {
    pub id: TopicId,
    pub name: String,
    pub keywords: Vec<String>,
}

/// One `(topic, word)` row of the expanded wordlist.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedKeyword {
    pub topic: TopicId,
    pub word: String,
}
