//! # Image Loading and Decoding
//!
//! Turns an attachment into something the PDF writer can embed, together
//! with its pixel dimensions. JPEG images pass through without re-encoding
//! (PDF supports DCTDecode natively) and only their header is read for the
//! dimensions. PNG and WebP are decoded to RGB pixels with a separate alpha
//! channel for SMask transparency.
//!
//! Loading is all-or-nothing: callers either get a complete [`LoadedImage`]
//! or an [`ImageError`].

use std::io::Cursor;

use crate::error::ImageError;
use crate::record::Attachment;

/// A fully decoded/loaded image ready for PDF embedding.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub pixel_data: ImagePixelData,
    pub width_px: u32,
    pub height_px: u32,
}

impl LoadedImage {
    /// Height for a given render width, keeping the original aspect ratio.
    pub fn scaled_height(&self, target_width: f64) -> f64 {
        self.height_px as f64 * target_width / self.width_px as f64
    }
}

/// The pixel data in a format the PDF serializer can consume directly.
#[derive(Debug, Clone)]
pub enum ImagePixelData {
    /// Raw JPEG bytes, embedded directly with DCTDecode.
    Jpeg {
        data: Vec<u8>,
        color_space: JpegColorSpace,
    },
    /// Decoded RGB pixels + optional alpha channel.
    Decoded {
        /// width * height * 3 bytes (RGB)
        rgb: Vec<u8>,
        /// width * height bytes (grayscale alpha). None if fully opaque.
        alpha: Option<Vec<u8>>,
    },
}

/// JPEG color space for the PDF /ColorSpace entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JpegColorSpace {
    DeviceRGB,
    DeviceGray,
}

/// Load an attached image.
pub fn load(attachment: &Attachment) -> Result<LoadedImage, ImageError> {
    let loaded = decode_image_bytes(&attachment.bytes)?;
    log::debug!(
        "loaded image '{}': {}x{} px",
        attachment.name,
        loaded.width_px,
        loaded.height_px
    );
    Ok(loaded)
}

/// Resolve an image source string to raw bytes.
///
/// Supported `src` formats:
/// - `data:image/...;base64,...` data URI
/// - File path (`/`, `./` or `../` prefixed)
/// - Raw base64-encoded image data
pub fn read_source(src: &str) -> Result<Vec<u8>, ImageError> {
    if src.starts_with("data:") {
        if !src.starts_with("data:image/") {
            return Err(ImageError::InvalidDataUri("not an image media type"));
        }
        let comma_pos = src
            .find(',')
            .ok_or(ImageError::InvalidDataUri("missing comma"))?;
        return base64_decode(&src[comma_pos + 1..]);
    }

    // Only explicit path prefixes count as paths; base64 text may contain '/'.
    if src.starts_with('/') || src.starts_with("./") || src.starts_with("../") {
        #[cfg(not(target_arch = "wasm32"))]
        {
            return std::fs::read(src).map_err(|source| ImageError::Read {
                path: src.to_string(),
                source,
            });
        }
        #[cfg(target_arch = "wasm32")]
        {
            return Err(ImageError::InvalidDataUri(
                "file paths are not available in WASM, use data URIs",
            ));
        }
    }

    base64_decode(src)
}

fn base64_decode(input: &str) -> Result<Vec<u8>, ImageError> {
    use base64::Engine;
    Ok(base64::engine::general_purpose::STANDARD.decode(input.trim())?)
}

/// Detect image format from magic bytes and decode accordingly.
fn decode_image_bytes(data: &[u8]) -> Result<LoadedImage, ImageError> {
    if data.len() < 4 {
        return Err(ImageError::TooShort);
    }

    if is_jpeg(data) {
        decode_jpeg(data)
    } else if is_png(data) || is_webp(data) {
        decode_to_rgb(data)
    } else {
        Err(ImageError::UnsupportedFormat)
    }
}

fn is_jpeg(data: &[u8]) -> bool {
    data.len() >= 2 && data[0] == 0xFF && data[1] == 0xD8
}

fn is_png(data: &[u8]) -> bool {
    data.len() >= 4 && data[0] == 0x89 && data[1] == 0x50 && data[2] == 0x4E && data[3] == 0x47
}

fn is_webp(data: &[u8]) -> bool {
    data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP"
}

/// JPEG: read dimensions and color space without decoding pixels.
fn decode_jpeg(data: &[u8]) -> Result<LoadedImage, ImageError> {
    let reader = image::io::Reader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)?;
    let (width, height) = reader.into_dimensions()?;

    Ok(LoadedImage {
        pixel_data: ImagePixelData::Jpeg {
            data: data.to_vec(),
            color_space: detect_jpeg_color_space(data),
        },
        width_px: width,
        height_px: height,
    })
}

/// Scan JPEG markers to find the SOF (Start of Frame) segment and read
/// the number of components to determine color space.
fn detect_jpeg_color_space(data: &[u8]) -> JpegColorSpace {
    let mut i = 2; // skip SOI marker (FF D8)
    while i + 1 < data.len() {
        if data[i] != 0xFF {
            break;
        }
        let marker = data[i + 1];
        // SOF markers: C0-C3, C5-C7, C9-CB, CD-CF
        let is_sof = matches!(marker, 0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF);
        if is_sof && i + 9 < data.len() {
            // length(2) + precision(1) + height(2) + width(2) + num_components(1)
            return if data[i + 9] == 1 {
                JpegColorSpace::DeviceGray
            } else {
                JpegColorSpace::DeviceRGB
            };
        }
        if i + 3 < data.len() {
            let seg_len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
            i += 2 + seg_len;
        } else {
            break;
        }
    }
    JpegColorSpace::DeviceRGB
}

/// PNG/WebP: decode to RGBA, split into RGB + alpha.
fn decode_to_rgb(data: &[u8]) -> Result<LoadedImage, ImageError> {
    let img = image::io::Reader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)?
        .decode()?;

    let rgba = img.to_rgba8();
    let width = rgba.width();
    let height = rgba.height();

    let pixel_count = (width * height) as usize;
    let mut rgb = Vec::with_capacity(pixel_count * 3);
    let mut alpha = Vec::with_capacity(pixel_count);
    let mut has_transparency = false;

    for pixel in rgba.pixels() {
        rgb.extend_from_slice(&pixel.0[..3]);
        alpha.push(pixel[3]);
        if pixel[3] != 255 {
            has_transparency = true;
        }
    }

    Ok(LoadedImage {
        pixel_data: ImagePixelData::Decoded {
            rgb,
            alpha: if has_transparency { Some(alpha) } else { None },
        },
        width_px: width,
        height_px: height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(w: u32, h: u32, alpha: u8) -> Vec<u8> {
        let img = image::RgbaImage::from_fn(w, h, |_, _| image::Rgba([255, 0, 0, alpha]));
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(encoder, img.as_raw(), w, h, image::ColorType::Rgba8)
            .unwrap();
        buf
    }

    #[test]
    fn test_magic_bytes() {
        assert!(is_jpeg(&[0xFF, 0xD8, 0xFF, 0xE0]));
        assert!(!is_jpeg(&[0x89, 0x50, 0x4E, 0x47]));
        assert!(is_png(&[0x89, 0x50, 0x4E, 0x47]));
        assert!(!is_png(&[0x89, 0x50]));
        assert!(is_webp(b"RIFF\0\0\0\0WEBPVP8 "));
    }

    #[test]
    fn test_too_short_data() {
        let err = load(&Attachment::new("x", vec![0x00, 0x01])).unwrap_err();
        assert!(matches!(err, ImageError::TooShort));
    }

    #[test]
    fn test_unsupported_format() {
        let err = load(&Attachment::new("x", b"GIF89a....".to_vec())).unwrap_err();
        assert!(matches!(err, ImageError::UnsupportedFormat));
    }

    #[test]
    fn test_truncated_png_fails() {
        let mut bytes = png_bytes(4, 4, 255);
        bytes.truncate(20);
        assert!(load(&Attachment::new("broken.png", bytes)).is_err());
    }

    #[test]
    fn test_decode_opaque_png() {
        let loaded = load(&Attachment::new("red.png", png_bytes(1, 1, 255))).unwrap();
        assert_eq!((loaded.width_px, loaded.height_px), (1, 1));
        match &loaded.pixel_data {
            ImagePixelData::Decoded { rgb, alpha } => {
                assert_eq!(rgb, &[255, 0, 0]);
                assert!(alpha.is_none(), "Fully opaque should have no alpha");
            }
            _ => panic!("PNG should decode to Decoded variant"),
        }
    }

    #[test]
    fn test_decode_png_with_alpha() {
        let loaded = load(&Attachment::new("red.png", png_bytes(1, 1, 128))).unwrap();
        match &loaded.pixel_data {
            ImagePixelData::Decoded { alpha, .. } => {
                assert_eq!(alpha.as_deref(), Some(&[128u8][..]));
            }
            _ => panic!("PNG should decode to Decoded variant"),
        }
    }

    #[test]
    fn test_jpeg_passes_through() {
        let img = image::RgbImage::from_fn(8, 4, |_, _| image::Rgb([0, 128, 255]));
        let mut buf = Vec::new();
        let encoder = image::codecs::jpeg::JpegEncoder::new(&mut buf);
        image::ImageEncoder::write_image(encoder, img.as_raw(), 8, 4, image::ColorType::Rgb8)
            .unwrap();

        let loaded = load(&Attachment::new("photo.jpg", buf.clone())).unwrap();
        assert_eq!((loaded.width_px, loaded.height_px), (8, 4));
        match &loaded.pixel_data {
            ImagePixelData::Jpeg { data, color_space } => {
                assert_eq!(data, &buf);
                assert_eq!(*color_space, JpegColorSpace::DeviceRGB);
            }
            _ => panic!("JPEG should stay as Jpeg variant"),
        }
    }

    #[test]
    fn test_scaled_height_keeps_aspect() {
        let loaded = LoadedImage {
            pixel_data: ImagePixelData::Decoded {
                rgb: vec![],
                alpha: None,
            },
            width_px: 800,
            height_px: 400,
        };
        assert_eq!(loaded.scaled_height(90.0), 45.0);
    }

    #[test]
    fn test_read_data_uri() {
        use base64::Engine;
        let bytes = png_bytes(2, 3, 255);
        let b64 = base64::engine::general_purpose::STANDARD.encode(&bytes);
        assert_eq!(read_source(&format!("data:image/png;base64,{}", b64)).unwrap(), bytes);
        assert_eq!(read_source(&b64).unwrap(), bytes);
    }

    #[test]
    fn test_invalid_data_uri() {
        assert!(matches!(
            read_source("data:image/png;base64"),
            Err(ImageError::InvalidDataUri(_))
        ));
        assert!(matches!(
            read_source("data:text/plain,hello"),
            Err(ImageError::InvalidDataUri(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_source("./no/such/image.png"),
            Err(ImageError::Read { .. })
        ));
    }
}
