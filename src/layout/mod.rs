//! # Layout
//!
//! The techpack is laid out by a [`DocumentBuilder`], which owns the page
//! list and a cursor: the baseline offset on the current page. Each block
//! kind (see [`blocks`]) draws at the cursor and advances it, and asks the
//! builder for a new page when the remaining space is too small. Builders
//! share nothing, so independent documents can be built side by side.
//!
//! Coordinates are millimetres from the top-left corner of the page; text
//! positions are baselines. The PDF writer converts to points.

pub mod blocks;
pub mod page_break;
pub mod techpack;

use std::sync::Arc;

use crate::config::LayoutConfig;
use crate::font::FontContext;
use crate::image_loader::LoadedImage;
use crate::style::{Color, TextAlign, TextStyle};

/// Points per millimetre.
pub const PT_PER_MM: f64 = 72.0 / 25.4;

/// A fully laid-out page ready for PDF serialization.
#[derive(Debug, Clone)]
pub struct LayoutPage {
    pub width: f64,
    pub height: f64,
    pub elements: Vec<DrawOp>,
}

/// One drawing operation, in emission order.
#[derive(Debug, Clone)]
pub enum DrawOp {
    /// A single line of text. `x` is the left edge after alignment.
    Text {
        x: f64,
        y: f64,
        text: String,
        style: TextStyle,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
        width: f64,
    },
    /// A filled rectangle; `y` is its top edge.
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Color,
    },
    /// An embedded image; `y` is its top edge.
    Image {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        image: Arc<LoadedImage>,
    },
}

impl LayoutPage {
    fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
        }
    }

    /// Text runs on this page, in emission order.
    pub fn texts(&self) -> impl Iterator<Item = (f64, &str)> {
        self.elements.iter().filter_map(|op| match op {
            DrawOp::Text { y, text, .. } => Some((*y, text.as_str())),
            _ => None,
        })
    }

    /// Text runs sharing a baseline joined left to right with a space,
    /// one entry per baseline in emission order. A key-value pair reads
    /// back as `"Key: value"`.
    pub fn text_lines(&self) -> Vec<String> {
        let mut rows: Vec<(f64, Vec<(f64, &str)>)> = Vec::new();
        for op in &self.elements {
            if let DrawOp::Text { x, y, text, .. } = op {
                match rows.iter_mut().find(|row| (row.0 - *y).abs() < 1e-6) {
                    Some((_, runs)) => runs.push((*x, text.as_str())),
                    None => rows.push((*y, vec![(*x, text.as_str())])),
                }
            }
        }
        rows.into_iter()
            .map(|(_, mut runs)| {
                runs.sort_by(|a, b| a.0.total_cmp(&b.0));
                runs.iter().map(|(_, t)| *t).collect::<Vec<_>>().join(" ")
            })
            .collect()
    }

    pub fn images(&self) -> impl Iterator<Item = &DrawOp> {
        self.elements
            .iter()
            .filter(|op| matches!(op, DrawOp::Image { .. }))
    }
}

/// Builds one document: owns the pages and the cursor.
pub struct DocumentBuilder<'a> {
    config: &'a LayoutConfig,
    fonts: &'a FontContext,
    page_width: f64,
    page_height: f64,
    pages: Vec<LayoutPage>,
    y: f64,
}

impl<'a> DocumentBuilder<'a> {
    /// Start a document with one empty page and the cursor at the top margin.
    pub fn new(config: &'a LayoutConfig, fonts: &'a FontContext) -> Self {
        let (page_width, page_height) = config.page_size.dimensions();
        Self {
            config,
            fonts,
            page_width,
            page_height,
            pages: vec![LayoutPage::new(page_width, page_height)],
            y: config.margin,
        }
    }

    /// Current baseline offset from the top of the page.
    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn advance(&mut self, dy: f64) {
        self.y += dy;
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn margin(&self) -> f64 {
        self.config.margin
    }

    pub fn page_width(&self) -> f64 {
        self.page_width
    }

    /// Lowest baseline content may use.
    pub fn bottom(&self) -> f64 {
        self.page_height - self.config.margin
    }

    pub fn remaining(&self) -> f64 {
        (self.bottom() - self.y).max(0.0)
    }

    pub fn column_width(&self) -> f64 {
        self.page_width - 2.0 * self.config.margin
    }

    /// Height usable on an empty page.
    pub fn content_height(&self) -> f64 {
        self.page_height - 2.0 * self.config.margin
    }

    /// True when the cursor sits at the top margin of its page.
    pub fn at_page_top(&self) -> bool {
        (self.y - self.config.margin).abs() < 1e-9
    }

    /// Start a new page and move the cursor to its top margin.
    pub fn new_page(&mut self) {
        self.pages
            .push(LayoutPage::new(self.page_width, self.page_height));
        self.y = self.config.margin;
        log::debug!("started page {}", self.pages.len());
    }

    /// Start a new page when `required` millimetres don't fit below the cursor.
    /// Returns whether a break happened.
    pub fn ensure_space(&mut self, required: f64) -> bool {
        if page_break::needs_break(self.y, required, self.bottom()) {
            log::debug!(
                "page break: {:.1} mm needed at y={:.1}, bottom={:.1}",
                required,
                self.y,
                self.bottom()
            );
            self.new_page();
            true
        } else {
            false
        }
    }

    /// Rendered width of `text` in millimetres.
    pub fn text_width(&self, text: &str, style: &TextStyle) -> f64 {
        self.fonts
            .measure_string(text, style.weight, style.font_size)
            / PT_PER_MM
    }

    /// Draw one line of text with its baseline at `y`. For right and centre
    /// alignment `x` is the right edge or the centre.
    pub fn draw_text(&mut self, x: f64, y: f64, text: &str, style: TextStyle, align: TextAlign) {
        let left = match align {
            TextAlign::Left => x,
            TextAlign::Right => x - self.text_width(text, &style),
            TextAlign::Center => x - self.text_width(text, &style) / 2.0,
        };
        self.push(DrawOp::Text {
            x: left,
            y,
            text: text.to_string(),
            style,
        });
    }

    pub fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.elements.push(op);
        }
    }

    /// Finish the document.
    pub fn finish(self) -> Vec<LayoutPage> {
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::FontWeight;

    #[test]
    fn starts_at_top_margin() {
        let config = LayoutConfig::default();
        let fonts = FontContext::new();
        let b = DocumentBuilder::new(&config, &fonts);
        assert_eq!(b.page_count(), 1);
        assert_eq!(b.y(), 20.0);
        assert!(b.at_page_top());
        assert_eq!(b.bottom(), 400.0);
        assert_eq!(b.column_width(), 257.0);
    }

    #[test]
    fn ensure_space_breaks_only_when_needed() {
        let config = LayoutConfig::default();
        let fonts = FontContext::new();
        let mut b = DocumentBuilder::new(&config, &fonts);
        b.advance(300.0);
        assert!(!b.ensure_space(80.0));
        assert_eq!(b.page_count(), 1);
        assert!(b.ensure_space(81.0));
        assert_eq!(b.page_count(), 2);
        assert_eq!(b.y(), 20.0);
    }

    #[test]
    fn right_aligned_text_ends_at_x() {
        let config = LayoutConfig::default();
        let fonts = FontContext::new();
        let mut b = DocumentBuilder::new(&config, &fonts);
        let style = TextStyle::new(14.0, Color::BLACK);
        b.draw_text(277.0, 20.0, "Total: 5", style, TextAlign::Right);
        let width = b.text_width("Total: 5", &style);
        let pages = b.finish();
        match &pages[0].elements[0] {
            DrawOp::Text { x, .. } => assert!((x + width - 277.0).abs() < 1e-9),
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn text_width_converts_to_mm() {
        let config = LayoutConfig::default();
        let fonts = FontContext::new();
        let b = DocumentBuilder::new(&config, &fonts);
        let style = TextStyle {
            font_size: 72.0,
            weight: FontWeight::Regular,
            color: Color::BLACK,
        };
        // A space is 278/1000 em: 72pt * 0.278 = 20.016pt = 7.061mm
        assert!((b.text_width(" ", &style) - 20.016 / PT_PER_MM).abs() < 1e-9);
    }

    #[test]
    fn text_lines_join_runs_on_a_baseline() {
        let config = LayoutConfig::default();
        let fonts = FontContext::new();
        let mut b = DocumentBuilder::new(&config, &fonts);
        let style = TextStyle::new(14.0, Color::BLACK);
        b.draw_text(60.0, 30.0, "280", style, TextAlign::Left);
        b.draw_text(20.0, 30.0, "Fabric GSM (gr/m²):", style, TextAlign::Left);
        b.draw_text(20.0, 38.0, "next", style, TextAlign::Left);
        let pages = b.finish();
        assert_eq!(
            pages[0].text_lines(),
            vec!["Fabric GSM (gr/m²): 280".to_string(), "next".to_string()]
        );
    }
}
