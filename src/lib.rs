//! news-thread: search a topic, fetch AI-generated news summaries and
//! export them as a PDF thread
//!
//! The two cooperating pieces are the [`SearchOrchestrator`], which owns
//! the request lifecycle together with a persisted search history and
//! article cache, and the [`DocumentExporter`], which lays out a
//! paginated document from the articles on display.

pub mod cache;
pub mod config;
pub mod export;
pub mod network;
pub mod search;
pub mod storage;

pub use cache::ArticleCache;
pub use config::Settings;
pub use export::{DocumentExporter, ExportError, ExportedDocument, LayoutPreset};
pub use network::{ApiClient, FetchError, NewsClient};
pub use search::{Article, SearchError, SearchHistory, SearchOrchestrator, SearchState};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
