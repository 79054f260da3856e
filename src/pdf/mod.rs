//! # PDF Serializer
//!
//! Takes the laid-out pages from the layout engine and writes a valid PDF file.
//!
//! This is a from-scratch PDF 1.7 writer. The document only needs the
//! standard Helvetica faces, filled rectangles, rules and raster images, so
//! the subset of PDF written here is small.
//!
//! ## PDF Structure (simplified)
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- objects (fonts, images, pages, content streams)
//! 2 0 obj ... endobj
//! ...
//! xref                <- cross-reference table (byte offsets of each object)
//! trailer             <- points to the root object
//! %%EOF
//! ```
//!
//! Layout coordinates are millimetres from the top-left corner; PDF user
//! space is points from the bottom-left. Every coordinate is converted here.

use std::fmt::Write as FmtWrite; // for write! on String
use std::io::Write as IoWrite; // for write! on Vec<u8>

use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::font::{winansi_fallback, StandardFont};
use crate::image_loader::{ImagePixelData, JpegColorSpace, LoadedImage};
use crate::layout::{DrawOp, LayoutPage, PT_PER_MM};
use crate::style::Color;

/// Document information dictionary entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
}

#[derive(Debug, Default)]
pub struct PdfWriter;

/// Tracks allocated PDF objects during writing.
struct PdfBuilder {
    objects: Vec<PdfObject>,
    /// Fonts in resource order (/F0, /F1, ...) with their object ids.
    font_objects: Vec<(StandardFont, usize)>,
    /// XObject ids for images, indexed as /Im0, /Im1, ...
    image_objects: Vec<usize>,
    /// Per page, the /Im indices of its images in drawing order.
    page_images: Vec<Vec<usize>>,
}

struct PdfObject {
    data: Vec<u8>,
}

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write laid-out pages to a PDF byte vector.
    pub fn write(&self, pages: &[LayoutPage], metadata: &Metadata) -> Vec<u8> {
        let mut builder = PdfBuilder {
            objects: Vec::new(),
            font_objects: Vec::new(),
            image_objects: Vec::new(),
            page_images: Vec::new(),
        };

        // Reserve object IDs:
        // 0 = placeholder (PDF objects are 1-indexed)
        // 1 = Catalog
        // 2 = Pages (page tree root)
        // 3+ = fonts, images, then page objects and content streams
        builder.objects.push(PdfObject { data: vec![] });
        builder.objects.push(PdfObject { data: vec![] });
        builder.objects.push(PdfObject { data: vec![] });

        self.register_fonts(&mut builder, pages);
        self.register_images(&mut builder, pages);

        let mut page_obj_ids: Vec<usize> = Vec::new();

        for (page_idx, page) in pages.iter().enumerate() {
            let content = self.build_content_stream(page, page_idx, &builder);
            let compressed = compress_to_vec_zlib(content.as_bytes(), 6);

            let content_obj_id = builder.objects.len();
            let mut content_data: Vec<u8> = Vec::new();
            let _ = write!(
                content_data,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            );
            content_data.extend_from_slice(&compressed);
            content_data.extend_from_slice(b"\nendstream");
            builder.objects.push(PdfObject { data: content_data });

            let page_obj_id = builder.objects.len();
            let font_resources = self.build_font_resource_dict(&builder.font_objects);
            let xobject_resources = self.build_xobject_resource_dict(page_idx, &builder);
            let resources = if xobject_resources.is_empty() {
                format!("/Font << {} >>", font_resources)
            } else {
                format!(
                    "/Font << {} >> /XObject << {} >>",
                    font_resources, xobject_resources
                )
            };
            let page_dict = format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Contents {} 0 R /Resources << {} >> >>",
                page.width * PT_PER_MM,
                page.height * PT_PER_MM,
                content_obj_id,
                resources
            );
            builder.objects.push(PdfObject {
                data: page_dict.into_bytes(),
            });
            page_obj_ids.push(page_obj_id);
        }

        builder.objects[1].data = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();

        let kids: String = page_obj_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        builder.objects[2].data = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            page_obj_ids.len()
        )
        .into_bytes();

        let info_obj_id = self.write_info(&mut builder, metadata);
        self.serialize(&builder, info_obj_id)
    }

    /// Add the Info dictionary when there is any metadata to record.
    fn write_info(&self, builder: &mut PdfBuilder, metadata: &Metadata) -> Option<usize> {
        if *metadata == Metadata::default() {
            return None;
        }
        let mut info = String::from("<< ");
        let entries = [
            ("Title", &metadata.title),
            ("Author", &metadata.author),
            ("Subject", &metadata.subject),
            ("Creator", &metadata.creator),
        ];
        for (key, value) in entries {
            if let Some(value) = value {
                let _ = write!(info, "/{} ({}) ", key, Self::encode_text(value));
            }
        }
        let _ = write!(info, "/Producer (techpack {}) >>", env!("CARGO_PKG_VERSION"));

        let id = builder.objects.len();
        builder.objects.push(PdfObject {
            data: info.into_bytes(),
        });
        Some(id)
    }

    /// Build the PDF content stream for a single page.
    fn build_content_stream(&self, page: &LayoutPage, page_idx: usize, builder: &PdfBuilder) -> String {
        let mut stream = String::new();
        let page_height = page.height * PT_PER_MM;
        let mut image_counter = 0usize;

        for op in &page.elements {
            match op {
                DrawOp::Text { x, y, text, style } => {
                    let font = StandardFont::for_weight(style.weight);
                    let font_idx = self.font_index(font, &builder.font_objects);
                    let c = style.color;
                    let _ = write!(
                        stream,
                        "BT\n/F{} {:.1} Tf\n{:.3} {:.3} {:.3} rg\n{:.2} {:.2} Td\n({}) Tj\nET\n",
                        font_idx,
                        style.font_size,
                        c.r,
                        c.g,
                        c.b,
                        x * PT_PER_MM,
                        page_height - y * PT_PER_MM,
                        Self::encode_text(text)
                    );
                }

                DrawOp::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    color,
                    width,
                } => {
                    let _ = write!(
                        stream,
                        "q\n{} RG\n{:.2} w\n{:.2} {:.2} m\n{:.2} {:.2} l\nS\nQ\n",
                        Self::color_components(color),
                        width * PT_PER_MM,
                        x1 * PT_PER_MM,
                        page_height - y1 * PT_PER_MM,
                        x2 * PT_PER_MM,
                        page_height - y2 * PT_PER_MM
                    );
                }

                DrawOp::Rect {
                    x,
                    y,
                    width,
                    height,
                    fill,
                } => {
                    let _ = write!(
                        stream,
                        "q\n{} rg\n{:.2} {:.2} {:.2} {:.2} re\nf\nQ\n",
                        Self::color_components(fill),
                        x * PT_PER_MM,
                        page_height - (y + height) * PT_PER_MM,
                        width * PT_PER_MM,
                        height * PT_PER_MM
                    );
                }

                DrawOp::Image {
                    x,
                    y,
                    width,
                    height,
                    ..
                } => {
                    let img_idx = builder
                        .page_images
                        .get(page_idx)
                        .and_then(|images| images.get(image_counter))
                        .copied();
                    image_counter += 1;
                    if let Some(img_idx) = img_idx {
                        let _ = write!(
                            stream,
                            "q\n{:.4} 0 0 {:.4} {:.2} {:.2} cm\n/Im{} Do\nQ\n",
                            width * PT_PER_MM,
                            height * PT_PER_MM,
                            x * PT_PER_MM,
                            page_height - (y + height) * PT_PER_MM,
                            img_idx
                        );
                    }
                }
            }
        }

        stream
    }

    fn color_components(color: &Color) -> String {
        format!("{:.3} {:.3} {:.3}", color.r, color.g, color.b)
    }

    /// Register the standard faces used across all pages. Helvetica is
    /// always present so every page has a font resource.
    fn register_fonts(&self, builder: &mut PdfBuilder, pages: &[LayoutPage]) {
        let used = |font: StandardFont| {
            pages.iter().flat_map(|p| &p.elements).any(|op| {
                matches!(op, DrawOp::Text { style, .. } if StandardFont::for_weight(style.weight) == font)
            })
        };

        let mut fonts = vec![StandardFont::Helvetica];
        if used(StandardFont::HelveticaBold) {
            fonts.push(StandardFont::HelveticaBold);
        }

        for font in fonts {
            let obj_id = builder.objects.len();
            let font_dict = format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} \
                 /Encoding /WinAnsiEncoding >>",
                font.pdf_name()
            );
            builder.objects.push(PdfObject {
                data: font_dict.into_bytes(),
            });
            builder.font_objects.push((font, obj_id));
        }
    }

    fn build_font_resource_dict(&self, font_objects: &[(StandardFont, usize)]) -> String {
        font_objects
            .iter()
            .enumerate()
            .map(|(i, (_, obj_id))| format!("/F{} {} 0 R", i, obj_id))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Look up the font index (/F0, /F1, etc.), falling back to the first font.
    fn font_index(&self, font: StandardFont, font_objects: &[(StandardFont, usize)]) -> usize {
        font_objects
            .iter()
            .position(|(f, _)| *f == font)
            .unwrap_or(0)
    }

    /// Create XObjects for every image, in page and drawing order.
    fn register_images(&self, builder: &mut PdfBuilder, pages: &[LayoutPage]) {
        for page in pages {
            let mut indices = Vec::new();
            for op in &page.elements {
                if let DrawOp::Image { image, .. } = op {
                    let img_idx = builder.image_objects.len();
                    let xobj_id = Self::write_image_xobject(builder, image);
                    builder.image_objects.push(xobj_id);
                    indices.push(img_idx);
                }
            }
            builder.page_images.push(indices);
        }
    }

    /// Write a single image as one or two XObject PDF objects.
    /// Returns the main XObject ID.
    fn write_image_xobject(builder: &mut PdfBuilder, image: &LoadedImage) -> usize {
        match &image.pixel_data {
            ImagePixelData::Jpeg { data, color_space } => {
                let color_space_str = match color_space {
                    JpegColorSpace::DeviceRGB => "/DeviceRGB",
                    JpegColorSpace::DeviceGray => "/DeviceGray",
                };

                let obj_id = builder.objects.len();
                let mut obj_data: Vec<u8> = Vec::new();
                let _ = write!(
                    obj_data,
                    "<< /Type /XObject /Subtype /Image \
                     /Width {} /Height {} \
                     /ColorSpace {} \
                     /BitsPerComponent 8 \
                     /Filter /DCTDecode \
                     /Length {} >>\nstream\n",
                    image.width_px,
                    image.height_px,
                    color_space_str,
                    data.len()
                );
                obj_data.extend_from_slice(data);
                obj_data.extend_from_slice(b"\nendstream");
                builder.objects.push(PdfObject { data: obj_data });
                obj_id
            }

            ImagePixelData::Decoded { rgb, alpha } => {
                // The SMask goes first so the image can reference it.
                let smask_id = alpha.as_ref().map(|alpha_data| {
                    let compressed_alpha = compress_to_vec_zlib(alpha_data, 6);
                    let smask_obj_id = builder.objects.len();
                    let mut smask_data: Vec<u8> = Vec::new();
                    let _ = write!(
                        smask_data,
                        "<< /Type /XObject /Subtype /Image \
                         /Width {} /Height {} \
                         /ColorSpace /DeviceGray \
                         /BitsPerComponent 8 \
                         /Filter /FlateDecode \
                         /Length {} >>\nstream\n",
                        image.width_px,
                        image.height_px,
                        compressed_alpha.len()
                    );
                    smask_data.extend_from_slice(&compressed_alpha);
                    smask_data.extend_from_slice(b"\nendstream");
                    builder.objects.push(PdfObject { data: smask_data });
                    smask_obj_id
                });

                let compressed_rgb = compress_to_vec_zlib(rgb, 6);
                let obj_id = builder.objects.len();
                let smask_ref = smask_id
                    .map(|id| format!(" /SMask {} 0 R", id))
                    .unwrap_or_default();

                let mut obj_data: Vec<u8> = Vec::new();
                let _ = write!(
                    obj_data,
                    "<< /Type /XObject /Subtype /Image \
                     /Width {} /Height {} \
                     /ColorSpace /DeviceRGB \
                     /BitsPerComponent 8 \
                     /Filter /FlateDecode \
                     /Length {}{} >>\nstream\n",
                    image.width_px,
                    image.height_px,
                    compressed_rgb.len(),
                    smask_ref
                );
                obj_data.extend_from_slice(&compressed_rgb);
                obj_data.extend_from_slice(b"\nendstream");
                builder.objects.push(PdfObject { data: obj_data });
                obj_id
            }
        }
    }

    fn build_xobject_resource_dict(&self, page_idx: usize, builder: &PdfBuilder) -> String {
        builder
            .page_images
            .get(page_idx)
            .map(|indices| {
                indices
                    .iter()
                    .map(|&idx| format!("/Im{} {} 0 R", idx, builder.image_objects[idx]))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default()
    }

    /// Escape special characters in a PDF string.
    fn escape_pdf_string(s: &str) -> String {
        s.replace('\\', "\\\\")
            .replace('(', "\\(")
            .replace(')', "\\)")
    }

    /// Encode text as the body of a WinAnsi literal string. Bytes outside
    /// printable ASCII are octal-escaped; unmappable characters become `?`.
    fn encode_text(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for ch in text.chars() {
            let b = Self::unicode_to_winansi(ch)
                .or_else(|| winansi_fallback(ch).and_then(Self::unicode_to_winansi))
                .unwrap_or(b'?');
            match b {
                0x20..=0x7E => out.push_str(&Self::escape_pdf_string(
                    (b as char).encode_utf8(&mut [0; 4]),
                )),
                _ => {
                    let _ = write!(out, "\\{:03o}", b);
                }
            }
        }
        out
    }

    /// Map a Unicode codepoint to a WinAnsiEncoding byte value.
    ///
    /// WinAnsiEncoding is based on Windows-1252. Most codepoints in
    /// 0x20..=0x7E and 0xA0..=0xFF map directly. The 0x80..=0x9F range
    /// holds smart quotes, bullets, dashes and a few accented letters.
    fn unicode_to_winansi(ch: char) -> Option<u8> {
        let cp = ch as u32;
        if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
            return Some(cp as u8);
        }
        match cp {
            0x20AC => Some(0x80), // Euro sign
            0x201A => Some(0x82), // Single low-9 quotation mark
            0x0192 => Some(0x83), // Latin small letter f with hook
            0x201E => Some(0x84), // Double low-9 quotation mark
            0x2026 => Some(0x85), // Horizontal ellipsis
            0x2020 => Some(0x86), // Dagger
            0x2021 => Some(0x87), // Double dagger
            0x02C6 => Some(0x88), // Modifier letter circumflex accent
            0x2030 => Some(0x89), // Per mille sign
            0x0160 => Some(0x8A), // Latin capital letter S with caron
            0x2039 => Some(0x8B), // Single left-pointing angle quotation
            0x0152 => Some(0x8C), // Latin capital ligature OE
            0x017D => Some(0x8E), // Latin capital letter Z with caron
            0x2018 => Some(0x91), // Left single quotation mark
            0x2019 => Some(0x92), // Right single quotation mark
            0x201C => Some(0x93), // Left double quotation mark
            0x201D => Some(0x94), // Right double quotation mark
            0x2022 => Some(0x95), // Bullet
            0x2013 => Some(0x96), // En dash
            0x2014 => Some(0x97), // Em dash
            0x02DC => Some(0x98), // Small tilde
            0x2122 => Some(0x99), // Trade mark sign
            0x0161 => Some(0x9A), // Latin small letter s with caron
            0x203A => Some(0x9B), // Single right-pointing angle quotation
            0x0153 => Some(0x9C), // Latin small ligature oe
            0x017E => Some(0x9E), // Latin small letter z with caron
            0x0178 => Some(0x9F), // Latin capital letter Y with diaeresis
            _ => None,
        }
    }

    /// Serialize all objects into the final PDF byte stream.
    fn serialize(&self, builder: &PdfBuilder, info_obj_id: Option<usize>) -> Vec<u8> {
        let mut output: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = vec![0; builder.objects.len()];

        output.extend_from_slice(b"%PDF-1.7\n");
        output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

        for (i, obj) in builder.objects.iter().enumerate().skip(1) {
            offsets[i] = output.len();
            let _ = write!(output, "{} 0 obj\n", i);
            output.extend_from_slice(&obj.data);
            output.extend_from_slice(b"\nendobj\n\n");
        }

        let xref_offset = output.len();
        let _ = write!(output, "xref\n0 {}\n", builder.objects.len());
        let _ = write!(output, "0000000000 65535 f \n");
        for offset in offsets.iter().skip(1) {
            let _ = write!(output, "{:010} 00000 n \n", offset);
        }

        let _ = write!(output, "trailer\n<< /Size {} /Root 1 0 R", builder.objects.len());
        if let Some(info_id) = info_obj_id {
            let _ = write!(output, " /Info {} 0 R", info_id);
        }
        let _ = write!(output, " >>\nstartxref\n{}\n%%EOF\n", xref_offset);

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{FontWeight, TextStyle};
    use miniz_oxide::inflate::decompress_to_vec_zlib;
    use std::sync::Arc;

    fn a3_page(elements: Vec<DrawOp>) -> LayoutPage {
        LayoutPage {
            width: 297.0,
            height: 420.0,
            elements,
        }
    }

    fn text_op(text: &str, weight: FontWeight) -> DrawOp {
        DrawOp::Text {
            x: 20.0,
            y: 20.0,
            text: text.to_string(),
            style: TextStyle {
                font_size: 14.0,
                weight,
                color: Color::BLACK,
            },
        }
    }

    /// Inflate the first content stream in the file.
    fn first_content_stream(bytes: &[u8]) -> String {
        let marker = b"/Filter /FlateDecode >>\nstream\n";
        let start = bytes
            .windows(marker.len())
            .position(|w| w == marker)
            .expect("content stream")
            + marker.len();
        let len = bytes[start..]
            .windows(b"\nendstream".len())
            .position(|w| w == b"\nendstream")
            .expect("endstream");
        let raw = decompress_to_vec_zlib(&bytes[start..start + len]).expect("inflate");
        String::from_utf8_lossy(&raw).into_owned()
    }

    #[test]
    fn test_escape_pdf_string() {
        assert_eq!(
            PdfWriter::escape_pdf_string("Hello (World)"),
            "Hello \\(World\\)"
        );
        assert_eq!(PdfWriter::escape_pdf_string("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn test_encode_text_winansi() {
        assert_eq!(PdfWriter::encode_text("gr/m²"), "gr/m\\262");
        assert_eq!(PdfWriter::encode_text("süprem"), "s\\374prem");
        assert_eq!(PdfWriter::encode_text("kaşkorse"), "kaskorse");
        assert_eq!(PdfWriter::encode_text("(a)"), "\\(a\\)");
        assert_eq!(PdfWriter::encode_text("日"), "?");
    }

    #[test]
    fn test_empty_document_produces_valid_pdf() {
        let bytes = PdfWriter::new().write(&[a3_page(vec![])], &Metadata::default());

        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(bytes.windows(5).any(|w| w == b"%%EOF"));
        assert!(bytes.windows(4).any(|w| w == b"xref"));
        assert!(bytes.windows(7).any(|w| w == b"trailer"));
        assert!(!bytes.windows(5).any(|w| w == b"/Info"));
    }

    #[test]
    fn test_a3_media_box_in_points() {
        let bytes = PdfWriter::new().write(&[a3_page(vec![])], &Metadata::default());
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/MediaBox [0 0 841.89 1190.55]"));
    }

    #[test]
    fn test_metadata_in_pdf() {
        let metadata = Metadata {
            title: Some("SAMO Techpack Order Form".to_string()),
            author: Some("SAMO".to_string()),
            subject: None,
            creator: None,
        };
        let bytes = PdfWriter::new().write(&[a3_page(vec![])], &metadata);
        let text = String::from_utf8_lossy(&bytes);

        assert!(text.contains("/Title (SAMO Techpack Order Form)"));
        assert!(text.contains("/Author (SAMO)"));
        assert!(!text.contains("/Subject"));
    }

    #[test]
    fn test_bold_font_registered_separately() {
        let pages = vec![a3_page(vec![
            text_op("A", FontWeight::Regular),
            text_op("A", FontWeight::Bold),
        ])];
        let bytes = PdfWriter::new().write(&pages, &Metadata::default());
        let text = String::from_utf8_lossy(&bytes);

        assert!(text.contains("/BaseFont /Helvetica "));
        assert!(text.contains("/BaseFont /Helvetica-Bold"));
        assert!(text.contains("/WinAnsiEncoding"));
    }

    #[test]
    fn test_text_position_flips_y() {
        let bytes = PdfWriter::new().write(
            &[a3_page(vec![text_op("Hi", FontWeight::Regular)])],
            &Metadata::default(),
        );
        let content = first_content_stream(&bytes);
        // 20 mm = 56.69 pt; 420 - 20 mm = 1133.86 pt
        assert!(content.contains("56.69 1133.86 Td"), "{}", content);
        assert!(content.contains("(Hi) Tj"));
        assert!(content.contains("/F0 14.0 Tf"));
    }

    #[test]
    fn test_rule_and_swatch_operators() {
        let pages = vec![a3_page(vec![
            DrawOp::Line {
                x1: 20.0,
                y1: 50.0,
                x2: 277.0,
                y2: 50.0,
                color: Color::gray(150),
                width: 0.2,
            },
            DrawOp::Rect {
                x: 60.0,
                y: 100.0,
                width: 12.0,
                height: 12.0,
                fill: Color::rgb(1.0, 0.0, 0.0),
            },
        ])];
        let content = first_content_stream(&PdfWriter::new().write(&pages, &Metadata::default()));
        assert!(content.contains("0.588 0.588 0.588 RG"));
        assert!(content.contains(" l\nS\n"));
        assert!(content.contains("1.000 0.000 0.000 rg"));
        assert!(content.contains("34.02 34.02 re\nf"));
    }

    #[test]
    fn test_image_xobject_with_smask() {
        let image = Arc::new(LoadedImage {
            pixel_data: ImagePixelData::Decoded {
                rgb: vec![255; 2 * 2 * 3],
                alpha: Some(vec![128; 4]),
            },
            width_px: 2,
            height_px: 2,
        });
        let pages = vec![a3_page(vec![DrawOp::Image {
            x: 20.0,
            y: 28.0,
            width: 90.0,
            height: 90.0,
            image,
        }])];
        let bytes = PdfWriter::new().write(&pages, &Metadata::default());
        let text = String::from_utf8_lossy(&bytes);

        assert!(text.contains("/Subtype /Image"));
        assert!(text.contains("/SMask"));
        assert!(text.contains("/XObject << /Im0"));
        let content = first_content_stream(&bytes);
        assert!(content.contains("/Im0 Do"));
    }

    #[test]
    fn test_jpeg_passthrough() {
        let data = vec![0xFF, 0xD8, 0xFF, 0xE0, 1, 2, 3];
        let image = Arc::new(LoadedImage {
            pixel_data: ImagePixelData::Jpeg {
                data: data.clone(),
                color_space: JpegColorSpace::DeviceRGB,
            },
            width_px: 8,
            height_px: 4,
        });
        let pages = vec![a3_page(vec![DrawOp::Image {
            x: 20.0,
            y: 28.0,
            width: 120.0,
            height: 60.0,
            image,
        }])];
        let bytes = PdfWriter::new().write(&pages, &Metadata::default());
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Filter /DCTDecode"));
        assert!(bytes.windows(data.len()).any(|w| w == data.as_slice()));
    }

    #[test]
    fn test_page_count_in_tree() {
        let pages = vec![a3_page(vec![]), a3_page(vec![]), a3_page(vec![])];
        let bytes = PdfWriter::new().write(&pages, &Metadata::default());
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Type /Pages"));
        assert!(text.contains("/Count 3"));
        assert_eq!(text.matches("/Type /Page ").count(), 3);
    }
}
