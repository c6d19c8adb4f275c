//! Drawing capability the layout algorithm renders into
//!
//! Coordinates are points with the origin at the top-left corner of the
//! page and `y` growing downwards; `y` of a text run is its baseline.

use super::text::FontStyle;
use super::ExportError;

/// RGB color, components in `0..=255`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const LINK: Rgb = Rgb(0, 0, 255);

    pub const fn gray(level: u8) -> Self {
        Rgb(level, level, level)
    }
}

/// Appearance of a text run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: FontStyle,
    pub size: f32,
    pub color: Rgb,
    /// Extra space added to every space character, for justification
    pub word_spacing: f32,
}

impl TextStyle {
    pub fn new(font: FontStyle, size: f32) -> Self {
        Self {
            font,
            size,
            color: Rgb::BLACK,
            word_spacing: 0.0,
        }
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn word_spacing(mut self, spacing: f32) -> Self {
        self.word_spacing = spacing;
        self
    }
}

/// Appearance of a rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub width: f32,
}

/// Paginated drawing target
///
/// A surface starts with one blank page; every draw call targets the last
/// page.
pub trait DocumentSurface {
    /// Number of pages, including the current one
    fn page_count(&self) -> usize;

    /// Append a page and make it current
    fn add_page(&mut self) -> Result<(), ExportError>;

    /// Draw a single line of text with its baseline at `(x, y)`
    fn text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) -> Result<(), ExportError>;

    /// Draw a straight rule
    fn line(&mut self, from: (f32, f32), to: (f32, f32), stroke: Stroke)
        -> Result<(), ExportError>;

    /// Make the rectangle with top-left `(x, y)` a hyperlink to `url`
    fn link(&mut self, x: f32, y: f32, width: f32, height: f32, url: &str)
        -> Result<(), ExportError>;

    /// Serialize the finished document
    fn finish(self) -> Result<Vec<u8>, ExportError>
    where
        Self: Sized;
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        page: usize,
        text: String,
        x: f32,
        y: f32,
        style: TextStyle,
    },
    Line {
        page: usize,
        from: (f32, f32),
        to: (f32, f32),
        stroke: Stroke,
    },
    Link {
        page: usize,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        url: String,
    },
}

impl DrawOp {
    /// One-based page the call landed on
    pub fn page(&self) -> usize {
        match self {
            DrawOp::Text { page, .. } | DrawOp::Line { page, .. } | DrawOp::Link { page, .. } => {
                *page
            }
        }
    }
}

/// Surface that records draw calls instead of rendering them
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    pages: usize,
    ops: Vec<DrawOp>,
    fail_on_page: Option<usize>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            pages: 1,
            ops: Vec::new(),
            fail_on_page: None,
        }
    }

    /// Fail as soon as anything is drawn on page `page`
    pub fn failing_on_page(page: usize) -> Self {
        Self {
            fail_on_page: Some(page),
            ..Self::new()
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Text runs drawn on a page, in order
    pub fn texts_on(&self, page: usize) -> Vec<&str> {
        self.ops
            .iter()
            .filter(|op| op.page() == page)
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, op: DrawOp) -> Result<(), ExportError> {
        if self.fail_on_page == Some(self.pages) {
            return Err(ExportError::Surface(format!(
                "simulated failure on page {}",
                self.pages
            )));
        }
        self.ops.push(op);
        Ok(())
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSurface for RecordingSurface {
    fn page_count(&self) -> usize {
        self.pages
    }

    fn add_page(&mut self) -> Result<(), ExportError> {
        self.pages += 1;
        Ok(())
    }

    fn text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) -> Result<(), ExportError> {
        let page = self.pages;
        self.record(DrawOp::Text {
            page,
            text: text.to_string(),
            x,
            y,
            style,
        })
    }

    fn line(
        &mut self,
        from: (f32, f32),
        to: (f32, f32),
        stroke: Stroke,
    ) -> Result<(), ExportError> {
        let page = self.pages;
        self.record(DrawOp::Line {
            page,
            from,
            to,
            stroke,
        })
    }

    fn link(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        url: &str,
    ) -> Result<(), ExportError> {
        let page = self.pages;
        self.record(DrawOp::Link {
            page,
            x,
            y,
            width,
            height,
            url: url.to_string(),
        })
    }

    fn finish(self) -> Result<Vec<u8>, ExportError> {
        Ok(format!("{:#?}", self.ops).into_bytes())
    }
}
