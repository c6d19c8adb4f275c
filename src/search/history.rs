//! Capped, case-insensitively de-duplicated search history

use serde::{Deserialize, Serialize};

/// Maximum number of topics kept in the history
pub const HISTORY_LIMIT: usize = 20;

/// Most-recent-first list of submitted topics
///
/// No two entries are equal ignoring case and the list never holds more
/// than [`HISTORY_LIMIT`] entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHistory {
    entries: Vec<String>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `topic` to the front, dropping any case-insensitive duplicate
    pub fn push(&mut self, topic: &str) {
        let lowered = topic.to_lowercase();
        self.entries.retain(|item| item.to_lowercase() != lowered);
        self.entries.insert(0, topic.to_string());
        self.entries.truncate(HISTORY_LIMIT);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Re-establish the invariants on data loaded from storage
    pub(crate) fn normalized(self) -> Self {
        let mut history = SearchHistory::new();
        for topic in self.entries.iter().rev() {
            history.push(topic);
        }
        history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_most_recent_first() {
        let mut history = SearchHistory::new();
        history.push("rust");
        history.push("climate");
        assert_eq!(history.entries(), &["climate", "rust"]);
    }

    #[test]
    fn test_push_dedups_ignoring_case() {
        let mut history = SearchHistory::new();
        history.push("AI");
        history.push("space");
        history.push("ai");
        assert_eq!(history.entries(), &["ai", "space"]);
    }

    #[test]
    fn test_cap() {
        let mut history = SearchHistory::new();
        for i in 0..45 {
            history.push(&format!("topic {}", i));
            assert!(history.len() <= HISTORY_LIMIT);
        }
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history.entries()[0], "topic 44");
        assert_eq!(history.entries()[HISTORY_LIMIT - 1], "topic 25");
    }

    #[test]
    fn test_normalized_repairs_loaded_data() {
        let raw: SearchHistory =
            serde_json::from_str(r#"["Mars", "mars", "Moon", "MARS"]"#).unwrap();
        let history = raw.normalized();
        assert_eq!(history.entries(), &["Mars", "Moon"]);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let mut history = SearchHistory::new();
        history.push("one");
        history.push("two");
        assert_eq!(serde_json::to_string(&history).unwrap(), r#"["two","one"]"#);
    }
}
