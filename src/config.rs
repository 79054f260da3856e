//! # Layout Configuration
//!
//! Page geometry, type sizes, spacing and the page-break estimates used by
//! the techpack layout. Every value has a default, so a configuration file
//! only needs to name what it changes. Lengths are millimetres and font
//! sizes are points.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TechpackError;

/// Page sizes in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    A3,
    A4,
    Custom {
        width: f64,
        height: f64,
    },
}

impl PageSize {
    /// Returns (width, height) in millimetres.
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PageSize::A3 => (297.0, 420.0),
            PageSize::A4 => (210.0, 297.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

/// What to do when an attached image cannot be read or decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageFailurePolicy {
    /// Stop generation and report the failure. No document is produced.
    #[default]
    Abort,
    /// Note the missing image in the document and keep going.
    Skip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FontSizes {
    pub title: f64,
    pub subtitle: f64,
    pub section: f64,
    pub annotation: f64,
    pub block_title: f64,
    pub body: f64,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            title: 36.0,
            subtitle: 18.0,
            section: 22.0,
            annotation: 14.0,
            block_title: 16.0,
            body: 14.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Spacing {
    pub after_title: f64,
    pub after_subtitle: f64,
    /// Baseline of a section title to its divider rule.
    pub header_rule_offset: f64,
    /// Divider rule to the first line of the section.
    pub after_header_rule: f64,
    /// Horizontal gap between a section title and its annotation.
    pub annotation_gap: f64,
    /// How far the annotation baseline sits above the title baseline.
    pub annotation_rise: f64,
    pub line_height: f64,
    /// Space after a long-text block.
    pub block_gap: f64,
    /// Space after an embedded image.
    pub image_gap: f64,
    /// Extra space between the fabric and order sections.
    pub after_fabric: f64,
    pub rule_width: f64,
    pub swatch_size: f64,
    /// Gap between the swatch label and the swatch.
    pub swatch_offset: f64,
    /// Distance from the end of the swatch label to the colour value text.
    pub swatch_text_offset: f64,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            after_title: 15.0,
            after_subtitle: 30.0,
            header_rule_offset: 12.0,
            after_header_rule: 15.0,
            annotation_gap: 10.0,
            annotation_rise: 5.0,
            line_height: 8.0,
            block_gap: 12.0,
            image_gap: 15.0,
            after_fabric: 5.0,
            rule_width: 0.2,
            swatch_size: 12.0,
            swatch_offset: 5.0,
            swatch_text_offset: 25.0,
        }
    }
}

/// Render widths of the attached images. Heights follow the aspect ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageWidths {
    pub fabric_sample: f64,
    pub design: f64,
}

impl Default for ImageWidths {
    fn default() -> Self {
        Self {
            fabric_sample: 90.0,
            design: 120.0,
        }
    }
}

/// Conservative space estimates checked before fixed groups of content.
/// They are deliberately rough; content may still run slightly past them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BreakEstimates {
    pub general_information: f64,
    pub product_description: f64,
    pub fabric_photo: f64,
    pub design_images: f64,
    pub section: f64,
}

impl Default for BreakEstimates {
    fn default() -> Self {
        Self {
            general_information: 80.0,
            product_description: 50.0,
            fabric_photo: 150.0,
            design_images: 180.0,
            section: 80.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub page_size: PageSize,
    pub margin: f64,
    pub title: String,
    pub subtitle: String,
    /// Shown in place of empty or absent values.
    pub not_applicable: String,
    pub fonts: FontSizes,
    pub spacing: Spacing,
    pub images: ImageWidths,
    pub estimates: BreakEstimates,
    pub image_failure_policy: ImageFailurePolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::A3,
            margin: 20.0,
            title: "SAMO TECHPACK ORDER FORM".to_string(),
            subtitle: "Knitwear Product Details".to_string(),
            not_applicable: "N/A".to_string(),
            fonts: FontSizes::default(),
            spacing: Spacing::default(),
            images: ImageWidths::default(),
            estimates: BreakEstimates::default(),
            image_failure_policy: ImageFailurePolicy::Abort,
        }
    }
}

impl LayoutConfig {
    pub fn from_json(json: &str) -> Result<Self, TechpackError> {
        let config: LayoutConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, TechpackError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Width available for text between the margins.
    pub fn column_width(&self) -> f64 {
        self.page_size.dimensions().0 - 2.0 * self.margin
    }

    /// Reject geometry the layout cannot work with.
    pub fn validate(&self) -> Result<(), TechpackError> {
        let (width, height) = self.page_size.dimensions();
        if !(width > 0.0 && height > 0.0) {
            return Err(TechpackError::Config(format!(
                "page size must be positive, got {} x {} mm",
                width, height
            )));
        }
        if self.margin < 0.0 || 2.0 * self.margin >= width.min(height) {
            return Err(TechpackError::Config(format!(
                "margin {} mm leaves no room on a {} x {} mm page",
                self.margin, width, height
            )));
        }
        if self.spacing.line_height <= 0.0 {
            return Err(TechpackError::Config(
                "line height must be positive".to_string(),
            ));
        }
        if self.images.fabric_sample <= 0.0 || self.images.design <= 0.0 {
            return Err(TechpackError::Config(
                "image widths must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
