//! The block kinds the techpack is made of.
//!
//! Every block draws at the builder's cursor and leaves the cursor below
//! itself, ready for the next block.

use std::sync::Arc;

use super::page_break::{self, BreakDecision};
use super::{DocumentBuilder, DrawOp, PT_PER_MM};
use crate::image_loader::LoadedImage;
use crate::style::{Color, TextAlign, TextStyle};
use crate::text::TextLayout;

/// Text tones used throughout the document.
const TITLE_GRAY: u8 = 20;
const ANNOTATION_GRAY: u8 = 100;
const RULE_GRAY: u8 = 150;
const VALUE_GRAY: u8 = 50;

impl DocumentBuilder<'_> {
    /// Centred document title and subtitle.
    pub fn document_title(&mut self, title: &str, subtitle: &str) {
        let config = self.config;
        let center = self.page_width / 2.0;

        let title_style = TextStyle::new(config.fonts.title, Color::gray(TITLE_GRAY)).bold();
        let y = self.y;
        self.draw_text(center, y, title, title_style, TextAlign::Center);
        self.advance(config.spacing.after_title);

        let subtitle_style = TextStyle::new(config.fonts.subtitle, Color::gray(ANNOTATION_GRAY));
        let y = self.y;
        self.draw_text(center, y, subtitle, subtitle_style, TextAlign::Center);
        self.advance(config.spacing.after_subtitle);
    }

    /// A section title over a full-width divider rule, with an optional
    /// annotation to the right of the title.
    pub fn section_header(&mut self, title: &str, annotation: Option<&str>) {
        let config = self.config;
        let spacing = &config.spacing;

        // Keep the header on the same page as the section's first line.
        self.ensure_space(spacing.header_rule_offset + spacing.after_header_rule);

        let margin = self.margin();
        let y = self.y;
        let title_style = TextStyle::new(config.fonts.section, Color::gray(TITLE_GRAY)).bold();
        self.draw_text(margin, y, title, title_style, TextAlign::Left);

        if let Some(annotation) = annotation {
            let style = TextStyle::new(config.fonts.annotation, Color::gray(ANNOTATION_GRAY));
            let x = margin + self.text_width(title, &title_style) + spacing.annotation_gap;
            self.draw_text(x, y - spacing.annotation_rise, annotation, style, TextAlign::Left);
        }

        self.advance(spacing.header_rule_offset);
        let rule_y = self.y;
        self.push(DrawOp::Line {
            x1: margin,
            y1: rule_y,
            x2: self.page_width - margin,
            y2: rule_y,
            color: Color::gray(RULE_GRAY),
            width: spacing.rule_width,
        });
        self.advance(spacing.after_header_rule);
    }

    /// `Key: value` on one line. An empty value prints the not-applicable
    /// marker.
    pub fn key_value(&mut self, key: &str, value: &str) {
        self.key_value_aligned(key, value, TextAlign::Left);
    }

    /// `Key: value`, either as a black key followed by a gray value from the
    /// left margin, or as one run ending at the right margin.
    pub fn key_value_aligned(&mut self, key: &str, value: &str, align: TextAlign) {
        let config = self.config;
        let value = if value.is_empty() {
            config.not_applicable.as_str()
        } else {
            value
        };

        // The baseline itself must stay above the bottom margin.
        self.ensure_space(0.0);

        let margin = self.margin();
        let y = self.y;
        let key_style = TextStyle::new(config.fonts.body, Color::BLACK);
        match align {
            TextAlign::Left => {
                self.draw_text(margin, y, &format!("{}:", key), key_style, TextAlign::Left);
                let value_x = margin + self.text_width(&format!("{}: ", key), &key_style);
                let value_style = TextStyle::new(config.fonts.body, Color::gray(VALUE_GRAY));
                self.draw_text(value_x, y, value, value_style, TextAlign::Left);
            }
            TextAlign::Right | TextAlign::Center => {
                let right = self.page_width - margin;
                let x = if align == TextAlign::Right {
                    right
                } else {
                    self.page_width / 2.0
                };
                self.draw_text(x, y, &format!("{}: {}", key, value), key_style, align);
            }
        }
        self.advance(config.spacing.line_height);
    }

    /// A titled block of free text wrapped to the column width. Empty text
    /// becomes a `Title: N/A` line instead.
    ///
    /// A block that doesn't fit below the cursor starts on the next page.
    /// One taller than a page is then continued line by line.
    pub fn long_text(&mut self, title: &str, content: &str) {
        if content.is_empty() {
            self.key_value(title, "");
            return;
        }

        let config = self.config;
        let line_height = config.spacing.line_height;
        let title_style = TextStyle::new(config.fonts.block_title, Color::BLACK);
        let body_style = TextStyle::new(config.fonts.body, Color::gray(VALUE_GRAY));

        let lines = TextLayout::new().break_into_lines(
            self.fonts,
            content,
            self.column_width() * PT_PER_MM,
            body_style.font_size,
            body_style.weight,
        );

        let mut rows: Vec<(String, TextStyle)> = Vec::with_capacity(lines.len() + 1);
        rows.push((format!("{}:", title), title_style));
        rows.extend(lines.into_iter().map(|l| (l.text, body_style)));

        let block_height = rows.len() as f64 * line_height;
        if !self.at_page_top() && block_height > self.remaining() {
            log::debug!("moving '{}' to the next page ({:.1} mm)", title, block_height);
            self.new_page();
        }

        let mut start = 0;
        while start < rows.len() {
            let heights = vec![line_height; rows.len() - start];
            let total: f64 = heights.iter().sum();
            let breakable = total > self.content_height();
            let count = match page_break::decide_break(self.remaining(), &heights, breakable, 2, 1)
            {
                BreakDecision::Place => heights.len(),
                BreakDecision::MoveToNextPage => {
                    ((self.remaining() / line_height).floor() as usize).clamp(1, heights.len())
                }
                BreakDecision::Split {
                    items_on_current_page,
                } => items_on_current_page,
            };

            let margin = self.margin();
            for (text, style) in &rows[start..start + count] {
                let y = self.y;
                self.draw_text(margin, y, text, *style, TextAlign::Left);
                self.advance(line_height);
            }
            start += count;
            if start < rows.len() {
                log::debug!("continuing '{}' on the next page", title);
                self.new_page();
            }
        }
        self.advance(config.spacing.block_gap);
    }

    /// A captioned image at `width` millimetres, height following the
    /// image's aspect ratio.
    pub fn image_block(&mut self, caption: &str, image: Arc<LoadedImage>, width: f64) {
        let config = self.config;
        let line_height = config.spacing.line_height;
        let height = image.scaled_height(width);

        if !self.at_page_top() {
            self.ensure_space(line_height + height);
        }

        let margin = self.margin();
        let y = self.y;
        let caption_style = TextStyle::new(config.fonts.block_title, Color::BLACK);
        self.draw_text(margin, y, &format!("{}:", caption), caption_style, TextAlign::Left);
        self.advance(line_height);

        let top = self.y;
        self.push(DrawOp::Image {
            x: margin,
            y: top,
            width,
            height,
            image,
        });
        self.advance(height + config.spacing.image_gap);
    }

    /// A colour chip: label, filled square, and the colour value as typed.
    pub fn color_swatch(&mut self, label: &str, color_value: &str) {
        let config = self.config;
        let spacing = &config.spacing;

        self.ensure_space(spacing.swatch_size / 2.0);

        let margin = self.margin();
        let y = self.y;
        let label_style = TextStyle::new(config.fonts.body, Color::BLACK);
        self.draw_text(margin, y, &format!("{}:", label), label_style, TextAlign::Left);

        let label_width = self.text_width(&format!("{}: ", label), &label_style);
        let fill = Color::parse_hex(color_value).unwrap_or_else(|| {
            log::warn!("'{}' is not a hex colour, drawing the swatch black", color_value);
            Color::BLACK
        });
        self.push(DrawOp::Rect {
            x: margin + label_width + spacing.swatch_offset,
            y: y - spacing.swatch_size / 2.0,
            width: spacing.swatch_size,
            height: spacing.swatch_size,
            fill,
        });

        let value_style = TextStyle::new(config.fonts.body, Color::gray(VALUE_GRAY));
        self.draw_text(
            margin + label_width + spacing.swatch_text_offset,
            y,
            color_value,
            value_style,
            TextAlign::Left,
        );
        self.advance(spacing.line_height);
    }
}
