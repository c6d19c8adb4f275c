//! Search, cache and history state machine

use super::history::SearchHistory;
use super::models::{Article, SearchState, SubmitOutcome, EMPTY_TOPIC_MESSAGE};
use crate::cache::ArticleCache;
use crate::export::{DocumentExporter, ExportError, ExportedDocument};
use crate::network::{FetchError, NewsClient};
use crate::storage::{load_slot, save_slot, KeyValueStore, CACHE_KEY, HISTORY_KEY};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// User-facing failure of a search action
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("{}", EMPTY_TOPIC_MESSAGE)]
    Validation,
    #[error("{message}")]
    Network {
        message: String,
        #[source]
        cause: FetchError,
    },
}

impl SearchError {
    /// Text for the error dialog
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Storage-backed search state container
///
/// Submissions take `&mut self`, so at most one is ever in flight per
/// orchestrator. A submission whose future is dropped mid-request leaves
/// the state in `Loading`; the next submission simply replaces it.
pub struct SearchOrchestrator {
    client: Arc<dyn NewsClient>,
    store: Arc<dyn KeyValueStore>,
    topic: String,
    state: SearchState,
    history: SearchHistory,
    cache: ArticleCache,
    /// Set when the user closed the dialog for the current error
    dialog_dismissed: bool,
    history_panel: bool,
}

impl SearchOrchestrator {
    /// Create an orchestrator, loading history and cache from `store`
    pub fn new(client: Arc<dyn NewsClient>, store: Arc<dyn KeyValueStore>) -> Self {
        let history = load_slot::<SearchHistory>(store.as_ref(), HISTORY_KEY).normalized();
        let cache: ArticleCache = load_slot(store.as_ref(), CACHE_KEY);
        debug!(
            "Loaded {} history entries and {} cached topics",
            history.len(),
            cache.len()
        );

        Self {
            client,
            store,
            topic: String::new(),
            state: SearchState::Idle,
            history,
            cache,
            dialog_dismissed: false,
            history_panel: false,
        }
    }

    /// Submit a topic: validate, serve from cache or fetch from the backend
    pub async fn submit(&mut self, term: &str) -> Result<SubmitOutcome, SearchError> {
        if term.trim().is_empty() {
            self.fail(SearchError::Validation.message());
            return Err(SearchError::Validation);
        }

        if let Some(cached) = self.cache.get(term) {
            info!("Serving '{}' from cache ({} articles)", term, cached.len());
            self.state = SearchState::Success(cached.to_vec());
            self.history.push(term);
            self.persist_history();
            return Ok(SubmitOutcome::CacheHit);
        }

        self.state = SearchState::Loading;

        info!("Fetching summaries for '{}'", term);
        match self.client.fetch_summaries(term).await {
            Ok(articles) => {
                info!("Fetched {} articles for '{}'", articles.len(), term);
                self.cache.insert(term, articles.clone());
                self.persist_cache();
                self.history.push(term);
                self.persist_history();
                self.state = SearchState::Success(articles);
                Ok(SubmitOutcome::Fetched)
            }
            Err(cause) => {
                error!("Failed to fetch summaries for '{}': {}", term, cause);
                let message = cause.user_message();
                self.fail(message.clone());
                Err(SearchError::Network { message, cause })
            }
        }
    }

    /// Submit whatever is currently in the topic input
    pub async fn submit_current(&mut self) -> Result<SubmitOutcome, SearchError> {
        let term = self.topic.clone();
        self.submit(&term).await
    }

    /// Re-run a topic picked from the history panel
    pub async fn select_history_item(&mut self, term: &str) -> Result<SubmitOutcome, SearchError> {
        self.history_panel = false;
        self.topic = term.to_string();
        self.submit(term).await
    }

    /// Empty the history, the cache and the displayed articles
    ///
    /// Topic text and error state are left alone.
    pub fn clear_history(&mut self) {
        info!("Clearing search history and article cache");
        self.history.clear();
        self.cache.clear();
        if let SearchState::Success(_) = self.state {
            self.state = SearchState::Success(Vec::new());
        }
        self.persist_history();
        self.persist_cache();
    }

    /// Export the articles on display under the current topic
    pub fn export_current(
        &self,
        exporter: &DocumentExporter,
    ) -> Result<ExportedDocument, ExportError> {
        exporter.export(&self.topic, self.articles())
    }

    fn fail(&mut self, message: String) {
        self.state = SearchState::Error(message);
        self.dialog_dismissed = false;
    }

    fn persist_history(&self) {
        if let Err(e) = save_slot(self.store.as_ref(), HISTORY_KEY, &self.history) {
            warn!("Failed to persist search history: {}", e);
        }
    }

    fn persist_cache(&self) {
        if let Err(e) = save_slot(self.store.as_ref(), CACHE_KEY, &self.cache) {
            warn!("Failed to persist article cache: {}", e);
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
    }

    pub fn articles(&self) -> &[Article] {
        self.state.articles()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Whether the error dialog is showing
    ///
    /// Only an `Error` state shows the dialog, until it is dismissed.
    pub fn error_dialog_visible(&self) -> bool {
        self.state.error().is_some() && !self.dialog_dismissed
    }

    /// Close the error dialog; the error message stays in the state
    pub fn dismiss_error(&mut self) {
        self.dialog_dismissed = true;
    }

    /// Clearing is only offered while there is history to clear
    pub fn can_clear_history(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    pub fn cache(&self) -> &ArticleCache {
        &self.cache
    }

    pub fn history_panel_open(&self) -> bool {
        self.history_panel
    }

    pub fn open_history_panel(&mut self) {
        self.history_panel = true;
    }

    pub fn close_history_panel(&mut self) {
        self.history_panel = false;
    }
}
