//! # Techpack Layout
//!
//! The order form's fixed document structure. Five logical pages are always
//! produced, in this order, whatever the record holds:
//!
//! ```text
//! 1. title, General Information, Product Description, Fabric Details,
//!    Order Quantities & Sizes
//! 2. Design Specifications & Drawings
//! 3. Branding Pack Information, Sewing & Production Instructions,
//!    Print & Applique Information
//! 4. Label Information, Hang Tags Information, Packaging Information
//! 5. Measurements Chart
//! ```
//!
//! Any page may overflow onto continuation pages. Attached images are
//! loaded one at a time, right before the block that shows them.

use std::sync::Arc;

use super::{DocumentBuilder, LayoutPage};
use crate::config::{ImageFailurePolicy, LayoutConfig};
use crate::error::TechpackError;
use crate::font::FontContext;
use crate::image_loader;
use crate::record::{Field, Record};

/// Shown in place of an image that failed to load under the skip policy.
const IMAGE_UNAVAILABLE: &str = "image unavailable";

pub struct TechpackLayout<'a> {
    config: &'a LayoutConfig,
    fonts: &'a FontContext,
}

impl<'a> TechpackLayout<'a> {
    pub fn new(config: &'a LayoutConfig, fonts: &'a FontContext) -> Self {
        Self { config, fonts }
    }

    /// Lay out a finished record. Fails only when an attached image can't be
    /// loaded and the failure policy is [`ImageFailurePolicy::Abort`].
    pub fn layout(&self, record: &Record) -> Result<Vec<LayoutPage>, TechpackError> {
        let mut b = DocumentBuilder::new(self.config, self.fonts);

        self.product_page(&mut b, record)?;
        b.new_page();
        self.design_page(&mut b, record)?;
        b.new_page();
        self.branding_page(&mut b, record);
        b.new_page();
        self.labels_page(&mut b, record);
        b.new_page();
        self.measurements_page(&mut b, record);

        let pages = b.finish();
        log::info!("laid out techpack on {} pages", pages.len());
        Ok(pages)
    }

    fn product_page(&self, b: &mut DocumentBuilder, record: &Record) -> Result<(), TechpackError> {
        let config = self.config;
        let estimates = &config.estimates;

        b.document_title(&config.title, &config.subtitle);

        b.ensure_space(estimates.general_information);
        let brand = if record.brand_name.is_empty() {
            config.not_applicable.as_str()
        } else {
            record.brand_name.as_str()
        };
        let annotation = format!("Brand: {}", brand);
        b.section_header("General Information", Some(annotation.as_str()));
        b.key_value("Category", &record.category);
        b.key_value("Model Code", &record.model_code);
        b.key_value("Style Name", &record.style_name);
        b.key_value("Brand Name", &record.brand_name);

        b.ensure_space(estimates.product_description);
        b.long_text("Product Description", &record.product_description);
        b.ensure_space(estimates.product_description);

        b.section_header("Fabric Details", None);
        b.key_value(
            "Fabric Type",
            record.fabric_type.map(|t| t.label()).unwrap_or_default(),
        );
        b.long_text("Fabric Content", &record.fabric_content);
        b.key_value("Fabric GSM (gr/m²)", &format_number(record.fabric_gsm));
        b.color_swatch("Fabric Color", &record.fabric_color);

        b.ensure_space(estimates.fabric_photo);
        self.attached_image(
            b,
            record,
            Field::FabricSamplePhoto,
            "Fabric Sample Photo",
            config.images.fabric_sample,
        )?;
        b.advance(config.spacing.after_fabric);

        b.section_header("Order Quantities & Sizes", None);
        b.key_value("Selected Sizes", &join_sizes(record));
        b.key_value("Total Quantity", &format_number(record.total_quantity));
        b.long_text(
            "Assorti Pack Details (Colorways, Sizes Distribution)",
            &record.assorti_pack_details,
        );
        Ok(())
    }

    fn design_page(&self, b: &mut DocumentBuilder, record: &Record) -> Result<(), TechpackError> {
        let config = self.config;

        b.section_header("Design Specifications & Drawings", None);
        b.ensure_space(config.estimates.design_images);
        self.attached_image(
            b,
            record,
            Field::InspirationPhoto,
            "Inspiration Photo",
            config.images.design,
        )?;
        self.attached_image(
            b,
            record,
            Field::TechnicalDrawing,
            "Technical Drawing",
            config.images.design,
        )?;
        b.long_text("Detailed Design Specifications", &record.design_spec_details);
        Ok(())
    }

    fn branding_page(&self, b: &mut DocumentBuilder, record: &Record) {
        let section = self.config.estimates.section;

        b.section_header("Branding Pack Information", None);
        b.key_value("ART No", &record.art_no);
        b.key_value("Collection Date", &record.collection_date);
        b.key_value("Back Neck Label", &record.back_neck_label);
        b.key_value("Sewing Ticket", &record.sewing_ticket);
        b.key_value("Poly Bag Info", &record.poly_bag_info);
        b.key_value("Tissue Paper Info", &record.tissue_paper_info);
        b.key_value(
            "Total Branding Pieces",
            &format_number(record.branding_total_pieces),
        );

        b.ensure_space(section);
        b.section_header("Sewing & Production Instructions", None);
        b.long_text("Sewing Instructions", &record.sewing_instructions);

        b.ensure_space(section);
        b.section_header("Print & Applique Information", None);
        b.long_text("Print & Applique Details", &record.print_applique_info);
    }

    fn labels_page(&self, b: &mut DocumentBuilder, record: &Record) {
        let section = self.config.estimates.section;

        b.section_header("Label Information", None);
        b.long_text("Label Details (Wash Care, Size, Content)", &record.label_info);

        b.ensure_space(section);
        b.section_header("Hang Tags Information", None);
        b.long_text("Hang Tag Details", &record.hang_tag_info);

        b.ensure_space(section);
        b.section_header("Packaging Information", None);
        b.long_text("Packaging Details", &record.packaging_info);
    }

    fn measurements_page(&self, b: &mut DocumentBuilder, record: &Record) {
        b.section_header("Measurements Chart", None);
        b.long_text(
            "Measurement Chart Details (Points of Measurements, Tolerance)",
            &record.measurements_details,
        );
    }

    /// Load and draw one attachment. Nothing is drawn for an absent one.
    fn attached_image(
        &self,
        b: &mut DocumentBuilder,
        record: &Record,
        field: Field,
        caption: &str,
        width: f64,
    ) -> Result<(), TechpackError> {
        let Some(attachment) = record.attachment(field) else {
            return Ok(());
        };

        match image_loader::load(attachment) {
            Ok(image) => b.image_block(caption, Arc::new(image), width),
            Err(source) => match self.config.image_failure_policy {
                ImageFailurePolicy::Abort => {
                    return Err(TechpackError::Image { field, source });
                }
                ImageFailurePolicy::Skip => {
                    log::warn!("skipping {} ('{}'): {}", field, attachment.name, source);
                    b.key_value(caption, IMAGE_UNAVAILABLE);
                }
            },
        }
        Ok(())
    }
}

/// Absent numbers print as empty (and so as the not-applicable marker);
/// zero prints as `0`.
fn format_number(value: Option<f64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

fn join_sizes(record: &Record) -> String {
    record
        .selected_sizes
        .iter()
        .map(|s| s.label())
        .collect::<Vec<_>>()
        .join(", ")
}
