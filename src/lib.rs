//! # Techpack
//!
//! Lays out apparel techpack order forms into paginated A3 PDF documents.
//!
//! A techpack is the hand-off from a designer to a knitwear factory: style
//! and fabric details, sizes and quantities, reference images, branding,
//! sewing, labelling and packaging instructions. This crate keeps the form's
//! answers in an immutable [`Record`] and renders it in a fixed section
//! order, moving blocks to the next page when they don't fit.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [record]       : Record, one field changed per update
//!       ↓
//!   [layout]       : cursor + pages, block kinds, fixed section order
//!       ↑
//!   [image_loader] : attachments loaded one at a time, as they're drawn
//!       ↓
//!   [pdf]          : serialize to PDF bytes
//!       ↓
//!   [export]       : samo_techpack_order_form.pdf
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod font;
pub mod image_loader;
pub mod layout;
pub mod pdf;
pub mod record;
pub mod registry;
pub mod style;
pub mod text;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{ImageFailurePolicy, LayoutConfig};
pub use error::TechpackError;
pub use export::{ExportedDocument, DOCUMENT_FILE_NAME};
pub use record::{Field, FieldValue, Record};

use font::FontContext;
use layout::techpack::TechpackLayout;
use pdf::Metadata;

/// Title recorded in the PDF information dictionary.
const DOCUMENT_TITLE: &str = "SAMO Techpack Order Form";

/// Render a record to a finished document.
///
/// This is the primary entry point. Nothing is produced if an attached
/// image fails to load under [`ImageFailurePolicy::Abort`].
pub fn generate(record: &Record, config: &LayoutConfig) -> Result<ExportedDocument, TechpackError> {
    config.validate()?;
    let font_context = FontContext::new();
    let pages = TechpackLayout::new(config, &font_context).layout(record)?;
    export::export(&pages, &metadata_for(record))
}

/// Render a form described as JSON with the default layout.
pub fn render_json(json: &str) -> Result<ExportedDocument, TechpackError> {
    let record = record::input::from_json(json)?;
    generate(&record, &LayoutConfig::default())
}

fn metadata_for(record: &Record) -> Metadata {
    Metadata {
        title: Some(DOCUMENT_TITLE.to_string()),
        author: Some(record.brand_name.clone()).filter(|b| !b.is_empty()),
        subject: Some(document_subject(record)),
        creator: Some(format!("techpack {}", env!("CARGO_PKG_VERSION"))),
    }
}

/// Subject line: model code and style name when given.
fn document_subject(record: &Record) -> String {
    let parts: Vec<&str> = [record.model_code.as_str(), record.style_name.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() {
        "Knitwear Product Details".to_string()
    } else {
        parts.join(" ")
    }
}
