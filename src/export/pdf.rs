//! PDF rendering of a laid-out document with printpdf

use super::preset::{PAGE_HEIGHT, PAGE_WIDTH};
use super::surface::{DocumentSurface, Rgb, Stroke, TextStyle};
use super::text::FontStyle;
use super::ExportError;
use printpdf::{
    Actions, BuiltinFont, Color, IndirectFontRef, Line, LinkAnnotation, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point, Pt, Rect,
};

const LAYER_NAME: &str = "Layer 1";

/// A4 PDF document using the built-in Helvetica faces
pub struct PdfSurface {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    pages: usize,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl PdfSurface {
    /// Create a one-page document titled `title`
    pub fn new(title: &str) -> Result<Self, ExportError> {
        let (doc, page, layer) =
            PdfDocument::new(title, mm(PAGE_WIDTH), mm(PAGE_HEIGHT), LAYER_NAME);
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(surface_err)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(surface_err)?;
        let italic = doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(surface_err)?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            pages: 1,
            regular,
            bold,
            italic,
        })
    }

    fn font(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
        }
    }
}

impl DocumentSurface for PdfSurface {
    fn page_count(&self) -> usize {
        self.pages
    }

    fn add_page(&mut self) -> Result<(), ExportError> {
        let (page, layer) = self
            .doc
            .add_page(mm(PAGE_WIDTH), mm(PAGE_HEIGHT), LAYER_NAME);
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.pages += 1;
        Ok(())
    }

    fn text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) -> Result<(), ExportError> {
        if text.is_empty() {
            return Ok(());
        }
        self.layer.set_fill_color(color(style.color));
        self.layer.set_word_spacing(style.word_spacing);
        self.layer
            .use_text(text, style.size, mm(x), mm(PAGE_HEIGHT - y), self.font(style.font));
        self.layer.set_word_spacing(0.0);
        Ok(())
    }

    fn line(
        &mut self,
        from: (f32, f32),
        to: (f32, f32),
        stroke: Stroke,
    ) -> Result<(), ExportError> {
        self.layer.set_outline_color(color(stroke.color));
        self.layer.set_outline_thickness(stroke.width);
        self.layer.add_line(Line {
            points: vec![(point(from.0, from.1), false), (point(to.0, to.1), false)],
            is_closed: false,
        });
        Ok(())
    }

    fn link(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        url: &str,
    ) -> Result<(), ExportError> {
        let rect = Rect::new(
            mm(x),
            mm(PAGE_HEIGHT - y - height),
            mm(x + width),
            mm(PAGE_HEIGHT - y),
        );
        self.layer.add_link_annotation(LinkAnnotation::new(
            rect,
            None,
            None,
            Actions::uri(url.to_string()),
            None,
        ));
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>, ExportError> {
        self.doc.save_to_bytes().map_err(surface_err)
    }
}

fn mm(points: f32) -> Mm {
    Mm::from(Pt(points))
}

// Flips from top-left to PDF bottom-left coordinates
fn point(x: f32, y: f32) -> Point {
    Point {
        x: Pt(x),
        y: Pt(PAGE_HEIGHT - y),
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(
        rgb.0 as f32 / 255.0,
        rgb.1 as f32 / 255.0,
        rgb.2 as f32 / 255.0,
        None,
    ))
}

fn surface_err(e: printpdf::Error) -> ExportError {
    ExportError::Surface(e.to_string())
}
