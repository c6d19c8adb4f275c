//! Search orchestration module
//!
//! Owns the topic input, the article cache, the search history and the
//! request lifecycle (idle, loading, success, error).

mod display;
mod history;
mod models;
mod orchestrator;

pub use display::{
    render_emphasis, summary_preview, Emphasis, SummaryView, EMPTY_HISTORY_MESSAGE,
    SUMMARY_PREVIEW_CHARS,
};
pub use history::{SearchHistory, HISTORY_LIMIT};
pub use models::*;
pub use orchestrator::{SearchError, SearchOrchestrator};
