//! Article cache
//!
//! Maps the lower-cased submitted topic to the articles the backend
//! returned for it. Entries never expire; the cache is only ever cleared
//! as a whole.

use crate::search::Article;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unbounded topic -> articles map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleCache {
    entries: HashMap<String, Vec<Article>>,
}

impl ArticleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get cached articles for a topic
    pub fn get(&self, topic: &str) -> Option<&[Article]> {
        self.entries
            .get(&cache_key(topic))
            .map(|articles| articles.as_slice())
    }

    /// Store the articles fetched for a topic
    pub fn insert(&mut self, topic: &str, articles: Vec<Article>) {
        self.entries.insert(cache_key(topic), articles);
    }

    /// Check whether a topic has been fetched before
    pub fn contains(&self, topic: &str) -> bool {
        self.entries.contains_key(&cache_key(topic))
    }

    /// Clear the entire cache
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Generate the cache key for a submitted topic
///
/// Lower-cased but not trimmed.
pub fn cache_key(topic: &str) -> String {
    topic.to_lowercase()
}
