//! Text measurement and word wrapping for the built-in Helvetica faces

use serde::{Deserialize, Serialize};

/// Font face used for a run of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

// Advance widths in 1/1000 em for ASCII 0x20..=0x7E (Adobe Helvetica AFM)
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const FALLBACK_WIDTH: u16 = 556;

fn char_width(c: char, style: FontStyle) -> u16 {
    let table = match style {
        FontStyle::Bold => &HELVETICA_BOLD,
        FontStyle::Regular | FontStyle::Italic => &HELVETICA,
    };
    let code = c as u32;
    if (0x20..=0x7E).contains(&code) {
        table[(code - 0x20) as usize]
    } else {
        FALLBACK_WIDTH
    }
}

/// Width of `text` in points at `size`
pub fn text_width(text: &str, style: FontStyle, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| char_width(c, style) as u32).sum();
    units as f32 * size / 1000.0
}

/// One wrapped line and whether it closes its paragraph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedLine {
    pub text: String,
    pub paragraph_end: bool,
}

/// Split `text` into lines no wider than `max_width` points
///
/// Newlines are hard breaks, whitespace runs collapse to a single space,
/// and a word wider than a whole line is broken between characters.
/// Always returns at least one line.
pub fn wrap_text(text: &str, style: FontStyle, size: f32, max_width: f32) -> Vec<String> {
    wrap_paragraphs(text, style, size, max_width)
        .into_iter()
        .map(|line| line.text)
        .collect()
}

/// Like [`wrap_text`], marking the last line of every paragraph
pub fn wrap_paragraphs(
    text: &str,
    style: FontStyle,
    size: f32,
    max_width: f32,
) -> Vec<WrappedLine> {
    let mut lines = Vec::new();
    let mut push = |text: String, paragraph_end: bool| {
        lines.push(WrappedLine {
            text,
            paragraph_end,
        })
    };

    for paragraph in text.split('\n') {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if text_width(&candidate, style, size) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                push(std::mem::take(&mut current), false);
            }

            if text_width(word, style, size) <= max_width {
                current = word.to_string();
            } else {
                let mut pieces = break_word(word, style, size, max_width);
                current = pieces.pop().unwrap_or_default();
                for piece in pieces {
                    push(piece, false);
                }
            }
        }

        push(current, true);
    }

    lines
}

fn break_word(word: &str, style: FontStyle, size: f32, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0;

    for c in word.chars() {
        let w = char_width(c, style) as f32 * size / 1000.0;
        if width + w > max_width && !piece.is_empty() {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(c);
        width += w;
    }
    pieces.push(piece);
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width() {
        // "Hi" = 722 + 222 units
        let width = text_width("Hi", FontStyle::Regular, 10.0);
        assert!((width - 9.44).abs() < 1e-4);
        assert!(text_width("Hi", FontStyle::Bold, 10.0) > width);
        assert_eq!(text_width("", FontStyle::Regular, 12.0), 0.0);
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        let lines = wrap_text("Hello world", FontStyle::Regular, 12.0, 500.0);
        assert_eq!(lines, vec!["Hello world"]);
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "the quick brown fox jumps over the lazy dog ".repeat(20);
        let lines = wrap_text(&text, FontStyle::Regular, 12.0, 200.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, FontStyle::Regular, 12.0) <= 200.0);
            assert!(!line.starts_with(' '));
        }
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_wrap_breaks_long_word() {
        let word = "x".repeat(500);
        let lines = wrap_text(&word, FontStyle::Regular, 12.0, 555.0);
        // 500 * 6pt = 3000pt across 555pt lines
        assert_eq!(lines.len(), 6);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(text_width(line, FontStyle::Regular, 12.0) <= 555.0);
        }
    }

    #[test]
    fn test_wrap_paragraphs_marks_paragraph_ends() {
        let text = format!("{}\n{}", "alpha beta gamma ".repeat(30), "short tail");
        let lines = wrap_paragraphs(&text, FontStyle::Regular, 12.0, 300.0);
        assert!(lines.len() > 3);

        let ends: Vec<&str> = lines
            .iter()
            .filter(|line| line.paragraph_end)
            .map(|line| line.text.as_str())
            .collect();
        assert_eq!(ends.len(), 2);
        assert_eq!(ends[1], "short tail");
        assert!(!lines[0].paragraph_end);
    }

    #[test]
    fn test_wrap_hard_breaks_and_empty() {
        let lines = wrap_text("one\n\ntwo", FontStyle::Regular, 12.0, 500.0);
        assert_eq!(lines, vec!["one", "", "two"]);
        assert_eq!(wrap_text("", FontStyle::Regular, 12.0, 500.0), vec![""]);
    }
}
