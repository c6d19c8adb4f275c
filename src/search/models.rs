//! Article and search-state data models

use serde::{Deserialize, Serialize};

/// Dialog text for an empty or whitespace-only topic
pub const EMPTY_TOPIC_MESSAGE: &str = "Please enter a topic to search.";

/// Dialog text for any network failure without a server-supplied message
pub const FETCH_FAILED_MESSAGE: &str =
    "Failed to fetch news summaries. Please try a different topic.";

/// One summarized news item returned by the summarization backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Headline
    pub title: String,
    /// Publisher name
    pub source: String,
    /// Link to the full article
    pub url: String,
    /// AI-generated summary text
    pub summary: String,
    /// Publication date, ISO-ish
    #[serde(default)]
    pub date: String,
    /// Byline, when the backend knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl Article {
    /// Create a new article without an author
    pub fn new(
        title: impl Into<String>,
        source: impl Into<String>,
        url: impl Into<String>,
        summary: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            source: source.into(),
            url: url.into(),
            summary: summary.into(),
            date: date.into(),
            author: None,
        }
    }
}

/// Request lifecycle of the search orchestrator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchState {
    #[default]
    Idle,
    Loading,
    Success(Vec<Article>),
    Error(String),
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading)
    }

    /// Articles currently on display
    pub fn articles(&self) -> &[Article] {
        match self {
            SearchState::Success(articles) => articles.as_slice(),
            _ => &[],
        }
    }

    /// Error message, if the last action failed
    pub fn error(&self) -> Option<&str> {
        match self {
            SearchState::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// How a successful submission was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Served from the article cache without touching the network
    CacheHit,
    /// Fetched from the summarization backend
    Fetched,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_deserialize_without_optional_fields() {
        let json = r#"{"title":"T","source":"S","url":"https://e.com","summary":"x"}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.date, "");
        assert!(article.author.is_none());
    }

    #[test]
    fn test_article_missing_title_is_rejected() {
        let json = r#"{"source":"S","url":"u","summary":"x","date":"2023-01-01"}"#;
        assert!(serde_json::from_str::<Article>(json).is_err());
    }

    #[test]
    fn test_state_accessors() {
        let article = Article::new("A", "S", "u", "x", "2023-01-01");
        let state = SearchState::Success(vec![article.clone()]);
        assert_eq!(state.articles(), &[article]);
        assert!(state.error().is_none());

        let state = SearchState::Error(EMPTY_TOPIC_MESSAGE.to_string());
        assert!(state.articles().is_empty());
        assert_eq!(state.error(), Some(EMPTY_TOPIC_MESSAGE));
        assert!(!state.is_loading());
    }
}
