//! Document export module
//!
//! Lays out a topic and its articles as a paginated A4 document and
//! renders it to PDF.

mod layout;
mod pdf;
mod preset;
mod surface;
mod text;

pub use layout::{display_article_date, DocumentExporter};
pub use pdf::PdfSurface;
pub use preset::{LayoutPreset, PageMetrics, PAGE_HEIGHT, PAGE_WIDTH};
pub use surface::{DocumentSurface, DrawOp, RecordingSurface, Rgb, Stroke, TextStyle};
pub use text::{text_width, wrap_text, FontStyle};

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Dialog text for any export failure
pub const EXPORT_FAILED_MESSAGE: &str = "Failed to download PDF. Please try again.";

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Failure while building or saving a document
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("rendering failed: {0}")]
    Surface(String),
    #[error("failed to write document: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// Message to show the user, whatever the cause
    pub fn user_message(&self) -> &'static str {
        EXPORT_FAILED_MESSAGE
    }
}

/// A finished document ready to be handed to the host
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ExportedDocument {
    /// Write the document into `dir`, returning the full path
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// File name for an exported topic
///
/// Whitespace runs become underscores; an empty topic becomes `news`.
/// Path separators are replaced too so the name stays a single component.
pub fn export_filename(topic: &str) -> String {
    let stem = WHITESPACE_RUN.replace_all(topic, "_").replace(['/', '\\'], "_");
    let stem = if stem.is_empty() { "news" } else { stem.as_str() };
    format!("{}_thread.pdf", stem)
}
