//! Presentation helpers for articles and history

use std::borrow::Cow;

/// Characters of a summary shown before "Read more"
pub const SUMMARY_PREVIEW_CHARS: usize = 200;

/// Shown in place of an empty history list
pub const EMPTY_HISTORY_MESSAGE: &str = "No search history yet";

/// How `**bold**` segments are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// Drop the markers, keep the text
    Plain,
    /// Wrap bold segments in ANSI bold escapes
    Ansi,
}

/// A summary as it should be displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView<'a> {
    pub text: Cow<'a, str>,
    /// Whether text was cut off, so "Read more" applies
    pub truncated: bool,
}

/// Cut a summary to its preview unless `full` is requested
///
/// The cut happens on the raw text, markers included, and the preview
/// ends in "...".
pub fn summary_preview(summary: &str, full: bool) -> SummaryView<'_> {
    let truncated = summary.chars().count() > SUMMARY_PREVIEW_CHARS;
    if full || !truncated {
        return SummaryView {
            text: Cow::Borrowed(summary),
            truncated,
        };
    }

    let mut preview: String = summary.chars().take(SUMMARY_PREVIEW_CHARS).collect();
    preview.push_str("...");
    SummaryView {
        text: Cow::Owned(preview),
        truncated,
    }
}

/// Render `**bold**` markers; every odd segment between markers is bold
pub fn render_emphasis(text: &str, emphasis: Emphasis) -> String {
    text.split("**")
        .enumerate()
        .map(|(i, part)| match (i % 2 == 1, emphasis) {
            (true, Emphasis::Ansi) if !part.is_empty() => format!("\x1b[1m{}\x1b[0m", part),
            _ => part.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_summary_untouched() {
        let view = summary_preview("Brief.", false);
        assert_eq!(view.text, "Brief.");
        assert!(!view.truncated);
    }

    #[test]
    fn test_long_summary_preview() {
        let summary = "é".repeat(250);
        let view = summary_preview(&summary, false);
        assert!(view.truncated);
        assert_eq!(view.text.chars().count(), SUMMARY_PREVIEW_CHARS + 3);
        assert!(view.text.ends_with("..."));

        let full = summary_preview(&summary, true);
        assert!(full.truncated);
        assert_eq!(full.text, summary);
    }

    #[test]
    fn test_exactly_preview_length_not_truncated() {
        let summary = "a".repeat(SUMMARY_PREVIEW_CHARS);
        assert!(!summary_preview(&summary, false).truncated);
    }

    #[test]
    fn test_render_emphasis_plain() {
        assert_eq!(
            render_emphasis("Markets **rally** after **rate cut**", Emphasis::Plain),
            "Markets rally after rate cut"
        );
        assert_eq!(render_emphasis("no markers", Emphasis::Plain), "no markers");
    }

    #[test]
    fn test_render_emphasis_ansi() {
        assert_eq!(
            render_emphasis("a **b** c", Emphasis::Ansi),
            "a \x1b[1mb\x1b[0m c"
        );
        // An unterminated marker bolds the rest
        assert_eq!(render_emphasis("a **b", Emphasis::Ansi), "a \x1b[1mb\x1b[0m");
    }
}
