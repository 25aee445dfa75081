//! Data models for selector specs, scraped records and their aggregations.
//!
//! - [`SelectorSpec`]: how to pull one field out of a parsed page
//! - [`RecordSpec`]: an ordered table of `"bucket.key"` names to selector specs
//! - [`ArticleRecord`]: the nested `bucket -> key -> value` result of one page
//! - [`AuthorIndex`]: records grouped by author display name
//! - [`LinkSet`]: deduplicated relative links discovered on the site
//! - [`LinkKind`]: which page template a link points at

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Declarative description of how to extract one field.
///
/// Without an `attribute` the element's text content is used, otherwise the
/// named attribute's value. When a `validator` is set only values matching it
/// are accepted.
#[derive(Debug, Clone)]
pub struct SelectorSpec {
    /// CSS selector, may contain compound and combinator syntax.
    pub selector: String,
    /// Attribute to read instead of the text content.
    pub attribute: Option<String>,
    /// Pattern the extracted value must match.
    pub validator: Option<Regex>,
}

impl SelectorSpec {
    /// Extract the text content of the first element matching `selector`.
    pub fn text(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            attribute: None,
            validator: None,
        }
    }

    /// Extract the value of `attribute` from the first element matching `selector`.
    pub fn attr(selector: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            attribute: Some(attribute.into()),
            validator: None,
        }
    }

    /// Only accept values matching `validator`.
    pub fn validated(mut self, validator: Regex) -> Self {
        self.validator = Some(validator);
        self
    }

    /// An empty spec is skipped by the record parser.
    pub fn is_empty(&self) -> bool {
        self.selector.trim().is_empty()
    }
}

/// Ordered mapping from `"bucket.key"` field names to selector specs.
pub type RecordSpec = Vec<(&'static str, SelectorSpec)>;

/// A scraped page: `bucket -> key -> value`.
///
/// A key whose selector matched nothing is present with a `null` value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleRecord {
    buckets: BTreeMap<String, BTreeMap<String, Option<String>>>,
}

impl ArticleRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `bucket` if it does not exist yet.
    pub fn ensure_bucket(&mut self, bucket: &str) -> &mut BTreeMap<String, Option<String>> {
        self.buckets.entry(bucket.to_string()).or_default()
    }

    pub fn set(&mut self, bucket: &str, key: &str, value: Option<String>) {
        self.ensure_bucket(bucket).insert(key.to_string(), value);
    }

    /// The value stored at `bucket.key`, `None` if the key is absent or null.
    pub fn get(&self, bucket: &str, key: &str) -> Option<&str> {
        self.buckets
            .get(bucket)
            .and_then(|fields| fields.get(key))
            .and_then(|value| value.as_deref())
    }

    /// Whether `bucket.key` was recorded, regardless of its value.
    pub fn contains(&self, bucket: &str, key: &str) -> bool {
        self.buckets
            .get(bucket)
            .is_some_and(|fields| fields.contains_key(key))
    }

    /// The trimmed `author.name`, or `None` when it is missing or blank.
    pub fn author_name(&self) -> Option<&str> {
        self.get("author", "name")
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Records grouped by author display name, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorIndex {
    authors: BTreeMap<String, Vec<ArticleRecord>>,
}

impl AuthorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `record` under its author.
    ///
    /// Returns `false` and drops the record when it has no author name.
    pub fn insert(&mut self, record: ArticleRecord) -> bool {
        let Some(name) = record.author_name().map(str::to_string) else {
            return false;
        };
        self.authors.entry(name).or_default().push(record);
        true
    }

    pub fn get(&self, author: &str) -> Option<&[ArticleRecord]> {
        self.authors.get(author).map(Vec::as_slice)
    }

    pub fn authors(&self) -> impl Iterator<Item = &str> {
        self.authors.keys().map(String::as_str)
    }

    /// Number of distinct authors.
    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }

    /// Number of records across all authors.
    pub fn record_count(&self) -> usize {
        self.authors.values().map(Vec::len).sum()
    }
}

/// Deduplicated set of relative links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkSet {
    links: BTreeSet<String>,
}

impl LinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, link: impl Into<String>) -> bool {
        self.links.insert(link.into())
    }

    pub fn contains(&self, link: &str) -> bool {
        self.links.contains(link)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn is_subset(&self, other: &LinkSet) -> bool {
        self.links.is_subset(&other.links)
    }
}

impl Extend<String> for LinkSet {
    fn extend<T: IntoIterator<Item = String>>(&mut self, iter: T) {
        self.links.extend(iter);
    }
}

impl FromIterator<String> for LinkSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            links: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for LinkSet {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.into_iter()
    }
}

/// Page template a link points at, decided by substrings of the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Directory listings, never scraped.
    Excluded,
    Article,
    Blog,
    /// Neither template; produces no record.
    Unclassified,
}

impl LinkKind {
    pub fn classify(link: &str) -> Self {
        if link.contains("directories") {
            LinkKind::Excluded
        } else if link.contains("article") {
            LinkKind::Article
        } else if link.contains("blog") {
            LinkKind::Blog
        } else {
            LinkKind::Unclassified
        }
    }
}
