//! Single-pass, top-to-bottom layout of a news thread

use super::pdf::PdfSurface;
use super::preset::{LayoutPreset, PageMetrics};
use super::surface::{DocumentSurface, Rgb, Stroke, TextStyle};
use super::text::{text_width, wrap_paragraphs, wrap_text, FontStyle};
use super::{export_filename, ExportError, ExportedDocument};
use crate::config::ExportSettings;
use crate::search::Article;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use tracing::{debug, error, info, warn};

const COVER_TITLE: &str = "Research Summary";
const SECTION_HEADER: &str = "Articles Summary";
const LINK_TEXT: &str = "Read full article";

const META_GRAY: Rgb = Rgb::gray(100);
const COVER_RULE: Stroke = Stroke {
    color: Rgb::gray(180),
    width: 0.8,
};
const DIVIDER: Stroke = Stroke {
    color: Rgb::gray(220),
    width: 0.5,
};

/// Builds paginated documents from a topic and its articles
#[derive(Debug, Clone)]
pub struct DocumentExporter {
    preset: LayoutPreset,
    attribution: String,
}

impl DocumentExporter {
    pub fn new(preset: LayoutPreset) -> Self {
        Self {
            preset,
            attribution: "Generated by FactsOnly AI".to_string(),
        }
    }

    pub fn from_settings(settings: &ExportSettings) -> Self {
        Self::new(settings.preset).with_attribution(settings.attribution.clone())
    }

    /// Set the attribution printed in every footer
    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = attribution.into();
        self
    }

    pub fn preset(&self) -> LayoutPreset {
        self.preset
    }

    /// Export as PDF, dated today
    pub fn export(&self, topic: &str, articles: &[Article]) -> Result<ExportedDocument, ExportError> {
        self.export_dated(topic, articles, Local::now().date_naive())
    }

    /// Export as PDF with an explicit generation date
    ///
    /// On failure the partially built document is dropped.
    pub fn export_dated(
        &self,
        topic: &str,
        articles: &[Article],
        generated_on: NaiveDate,
    ) -> Result<ExportedDocument, ExportError> {
        let result = PdfSurface::new(&format!("{} - News Thread", topic)).and_then(|mut surface| {
            self.render(&mut surface, topic, articles, generated_on)?;
            surface.finish()
        });

        match result {
            Ok(bytes) => {
                let document = ExportedDocument {
                    filename: export_filename(topic),
                    bytes,
                };
                info!(
                    "Exported {} articles to {} ({} bytes)",
                    articles.len(),
                    document.filename,
                    document.bytes.len()
                );
                Ok(document)
            }
            Err(e) => {
                error!("Download error: {}", e);
                Err(e)
            }
        }
    }

    /// Lay out the document onto any surface
    pub fn render<S: DocumentSurface>(
        &self,
        surface: &mut S,
        topic: &str,
        articles: &[Article],
        generated_on: NaiveDate,
    ) -> Result<(), ExportError> {
        let mut layout = Layout {
            surface,
            m: self.preset.metrics(),
            attribution: self.attribution.as_str(),
            y: 0.0,
        };
        layout.run(topic, articles, generated_on)
    }
}

impl Default for DocumentExporter {
    fn default() -> Self {
        Self::new(LayoutPreset::default())
    }
}

struct Layout<'a, S: DocumentSurface> {
    surface: &'a mut S,
    m: PageMetrics,
    attribution: &'a str,
    y: f32,
}

impl<S: DocumentSurface> Layout<'_, S> {
    fn run(&mut self, topic: &str, articles: &[Article], generated_on: NaiveDate) -> Result<(), ExportError> {
        if self.m.cover_page {
            self.cover(topic, generated_on)?;
            self.surface.add_page()?;
        }
        self.y = self.m.margin;
        self.header(topic, generated_on)?;

        for (index, article) in articles.iter().enumerate() {
            self.article(index, article)?;
        }

        self.footer()?;
        debug!(
            "Laid out {} articles on {} pages",
            articles.len(),
            self.surface.page_count()
        );
        Ok(())
    }

    fn cover(&mut self, topic: &str, generated_on: NaiveDate) -> Result<(), ExportError> {
        let top = self.m.margin;

        let title = TextStyle::new(FontStyle::Bold, 28.0);
        self.centered(COVER_TITLE, top + 60.0, title)?;

        let topic_style = TextStyle::new(FontStyle::Regular, 20.0);
        let lines = wrap_text(topic, topic_style.font, topic_style.size, self.m.content_width());
        let mut y = top + 110.0;
        for line in &lines {
            self.centered(line, y, topic_style)?;
            y += topic_style.size * 1.15;
        }

        let date_line = format!("Generated on: {}", format_date(generated_on));
        self.centered(&date_line, top + 150.0, TextStyle::new(FontStyle::Regular, 12.0))?;

        self.surface.line(
            (self.m.margin, top + 180.0),
            (self.m.page_width() - self.m.margin, top + 180.0),
            COVER_RULE,
        )
    }

    fn header(&mut self, topic: &str, generated_on: NaiveDate) -> Result<(), ExportError> {
        let style = TextStyle::new(FontStyle::Bold, self.m.header_size);
        self.surface.text(SECTION_HEADER, self.m.margin, self.y, style)?;
        self.y += self.m.header_gap;

        if !self.m.cover_page {
            let subtitle = format!("{} | Generated on: {}", topic, format_date(generated_on));
            let style = TextStyle::new(FontStyle::Italic, self.m.meta_size).color(META_GRAY);
            self.lines(&subtitle, style)?;
            self.y += self.m.summary_gap;
        }
        Ok(())
    }

    fn article(&mut self, index: usize, article: &Article) -> Result<(), ExportError> {
        let width = self.m.content_width();
        let title_style = TextStyle::new(FontStyle::Bold, self.m.title_size);
        let meta_style = TextStyle::new(FontStyle::Italic, self.m.meta_size).color(META_GRAY);
        let body_style = TextStyle::new(FontStyle::Regular, self.m.body_size);

        let title = wrap_text(
            &format!("{}. {}", index + 1, article.title),
            title_style.font,
            title_style.size,
            width,
        );
        let meta = wrap_text(
            &format!(
                "Source: {} | Date: {}",
                article.source,
                display_article_date(&article.date)
            ),
            meta_style.font,
            meta_style.size,
            width,
        );
        let body = wrap_paragraphs(&article.summary, body_style.font, body_style.size, width);

        // Keep the heading together with the first body line
        let heading = (title.len() + meta.len() + 1) as f32 * self.m.line_height;
        self.ensure_room(heading)?;

        for line in &title {
            self.line_of_text(line, title_style)?;
        }
        for line in &meta {
            self.line_of_text(line, meta_style)?;
        }

        // Paragraph-closing lines stay ragged
        for line in &body {
            let spacing = if line.paragraph_end {
                0.0
            } else {
                justify_spacing(&line.text, body_style, width)
            };
            self.line_of_text(&line.text, body_style.word_spacing(spacing))?;
        }
        self.y += self.m.summary_gap;

        self.ensure_room(self.m.line_height)?;
        let link_style = TextStyle::new(FontStyle::Regular, self.m.body_size).color(Rgb::LINK);
        self.surface.text(LINK_TEXT, self.m.margin, self.y, link_style)?;
        if url::Url::parse(&article.url).is_ok() {
            let link_width = text_width(LINK_TEXT, link_style.font, link_style.size);
            self.surface.link(
                self.m.margin,
                self.y - link_style.size,
                link_width,
                link_style.size * 1.2,
                &article.url,
            )?;
        } else {
            warn!("Article {} has no usable URL: {:?}", index + 1, article.url);
        }
        self.y += self.m.link_gap;

        self.ensure_room(0.0)?;
        self.surface.line(
            (self.m.margin, self.y),
            (self.m.page_width() - self.m.margin, self.y),
            DIVIDER,
        )?;
        self.y += self.m.divider_gap;
        Ok(())
    }

    /// Draw wrapped text starting at the cursor
    fn lines(&mut self, text: &str, style: TextStyle) -> Result<(), ExportError> {
        for line in wrap_text(text, style.font, style.size, self.m.content_width()) {
            self.line_of_text(&line, style)?;
        }
        Ok(())
    }

    fn line_of_text(&mut self, line: &str, style: TextStyle) -> Result<(), ExportError> {
        self.ensure_room(0.0)?;
        self.surface.text(line, self.m.margin, self.y, style)?;
        self.y += self.m.line_height;
        Ok(())
    }

    fn centered(&mut self, text: &str, y: f32, style: TextStyle) -> Result<(), ExportError> {
        let x = (self.m.page_width() - text_width(text, style.font, style.size)) / 2.0;
        self.surface.text(text, x, y, style)
    }

    /// Break the page unless `extra` more points fit below the cursor
    fn ensure_room(&mut self, extra: f32) -> Result<(), ExportError> {
        let at_top = self.y <= self.m.margin;
        if self.y + extra > self.m.content_limit() && !at_top {
            self.footer()?;
            self.surface.add_page()?;
            self.y = self.m.margin;
        }
        Ok(())
    }

    fn footer(&mut self) -> Result<(), ExportError> {
        let style = TextStyle::new(FontStyle::Italic, self.m.footer_size).color(META_GRAY);
        let y = self.m.footer_y();
        let page = format!("Page {}", self.surface.page_count());
        self.surface.text(&page, self.m.page_width() - 60.0, y, style)?;
        self.surface.text(self.attribution, 50.0, y, style)
    }
}

fn justify_spacing(line: &str, style: TextStyle, width: f32) -> f32 {
    let gaps = line.matches(' ').count();
    if gaps == 0 {
        return 0.0;
    }
    let slack = width - text_width(line, style.font, style.size);
    (slack / gaps as f32).max(0.0)
}

fn format_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Render an article date as `M/D/YYYY`, or verbatim when unparsable
pub fn display_article_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return format_date(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return format_date(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return format_date(dt.date());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return format_date(date);
    }
    raw.to_string()
}
