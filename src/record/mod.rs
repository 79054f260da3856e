//! # Form State Store
//!
//! The techpack record: every field the order form collects, always fully
//! populated. Records are never edited in place. [`Record::update`] hands
//! back a new record with exactly one field changed, and the layout engine
//! reads the finished record once at generation time.

pub mod input;

use std::fmt;

use crate::error::RecordError;
use crate::registry::{FabricType, Size};

/// Brand pre-filled when the form is opened.
pub const DEFAULT_BRAND_NAME: &str = "SAMO";
/// Swatch colour pre-filled when the form is opened.
pub const DEFAULT_FABRIC_COLOR: &str = "#60a5fa";

/// An image attached to the form, kept as the raw uploaded bytes.
#[derive(Clone, PartialEq)]
pub struct Attachment {
    /// Original file name or source description, for messages only.
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("name", &self.name)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// The complete form record.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub category: String,
    pub model_code: String,
    pub style_name: String,
    pub brand_name: String,
    pub inspiration_photo: Option<Attachment>,
    pub technical_drawing: Option<Attachment>,
    pub product_description: String,
    pub fabric_type: Option<FabricType>,
    pub fabric_content: String,
    /// Grams per square metre. `None` is "not given", distinct from zero.
    pub fabric_gsm: Option<f64>,
    /// Swatch colour as typed, normally a `#rrggbb` hex string.
    pub fabric_color: String,
    pub fabric_sample_photo: Option<Attachment>,
    /// Selected sizes in the order they were picked. No duplicates.
    pub selected_sizes: Vec<Size>,
    pub total_quantity: Option<f64>,
    pub assorti_pack_details: String,
    pub design_spec_details: String,
    pub art_no: String,
    pub collection_date: String,
    pub back_neck_label: String,
    pub sewing_ticket: String,
    pub poly_bag_info: String,
    pub tissue_paper_info: String,
    pub branding_total_pieces: Option<f64>,
    pub sewing_instructions: String,
    pub print_applique_info: String,
    pub label_info: String,
    pub hang_tag_info: String,
    pub packaging_info: String,
    pub measurements_details: String,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            category: String::new(),
            model_code: String::new(),
            style_name: String::new(),
            brand_name: DEFAULT_BRAND_NAME.to_string(),
            inspiration_photo: None,
            technical_drawing: None,
            product_description: String::new(),
            fabric_type: None,
            fabric_content: String::new(),
            fabric_gsm: None,
            fabric_color: DEFAULT_FABRIC_COLOR.to_string(),
            fabric_sample_photo: None,
            selected_sizes: Vec::new(),
            total_quantity: None,
            assorti_pack_details: String::new(),
            design_spec_details: String::new(),
            art_no: String::new(),
            collection_date: String::new(),
            back_neck_label: String::new(),
            sewing_ticket: String::new(),
            poly_bag_info: String::new(),
            tissue_paper_info: String::new(),
            branding_total_pieces: None,
            sewing_instructions: String::new(),
            print_applique_info: String::new(),
            label_info: String::new(),
            hang_tag_info: String::new(),
            packaging_info: String::new(),
            measurements_details: String::new(),
        }
    }
}

/// Every declared record key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Category,
    ModelCode,
    StyleName,
    BrandName,
    InspirationPhoto,
    TechnicalDrawing,
    ProductDescription,
    FabricType,
    FabricContent,
    FabricGsm,
    FabricColor,
    FabricSamplePhoto,
    SelectedSizes,
    TotalQuantity,
    AssortiPackDetails,
    DesignSpecDetails,
    ArtNo,
    CollectionDate,
    BackNeckLabel,
    SewingTicket,
    PolyBagInfo,
    TissuePaperInfo,
    BrandingTotalPieces,
    SewingInstructions,
    PrintAppliqueInfo,
    LabelInfo,
    HangTagInfo,
    PackagingInfo,
    MeasurementsDetails,
}

/// The value shape a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    FabricType,
    Sizes,
    Attachment,
}

impl FieldKind {
    pub fn describe(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "numeric",
            FieldKind::FabricType => "fabric type",
            FieldKind::Sizes => "size selection",
            FieldKind::Attachment => "attachment",
        }
    }
}

impl Field {
    pub const ALL: [Field; 29] = [
        Field::Category,
        Field::ModelCode,
        Field::StyleName,
        Field::BrandName,
        Field::InspirationPhoto,
        Field::TechnicalDrawing,
        Field::ProductDescription,
        Field::FabricType,
        Field::FabricContent,
        Field::FabricGsm,
        Field::FabricColor,
        Field::FabricSamplePhoto,
        Field::SelectedSizes,
        Field::TotalQuantity,
        Field::AssortiPackDetails,
        Field::DesignSpecDetails,
        Field::ArtNo,
        Field::CollectionDate,
        Field::BackNeckLabel,
        Field::SewingTicket,
        Field::PolyBagInfo,
        Field::TissuePaperInfo,
        Field::BrandingTotalPieces,
        Field::SewingInstructions,
        Field::PrintAppliqueInfo,
        Field::LabelInfo,
        Field::HangTagInfo,
        Field::PackagingInfo,
        Field::MeasurementsDetails,
    ];

    /// The form key, as used in JSON input.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Category => "category",
            Field::ModelCode => "modelCode",
            Field::StyleName => "styleName",
            Field::BrandName => "brandName",
            Field::InspirationPhoto => "inspirationPhoto",
            Field::TechnicalDrawing => "technicalDrawing",
            Field::ProductDescription => "productDescription",
            Field::FabricType => "fabricType",
            Field::FabricContent => "fabricContent",
            Field::FabricGsm => "fabricGSM",
            Field::FabricColor => "fabricColor",
            Field::FabricSamplePhoto => "fabricSamplePhoto",
            Field::SelectedSizes => "selectedSizes",
            Field::TotalQuantity => "totalQuantity",
            Field::AssortiPackDetails => "assortiPackDetails",
            Field::DesignSpecDetails => "designSpecDetails",
            Field::ArtNo => "artNo",
            Field::CollectionDate => "collectionDate",
            Field::BackNeckLabel => "backNeckLabel",
            Field::SewingTicket => "sewingTicket",
            Field::PolyBagInfo => "polyBagInfo",
            Field::TissuePaperInfo => "tissuePaperInfo",
            Field::BrandingTotalPieces => "brandingTotalPieces",
            Field::SewingInstructions => "sewingInstructions",
            Field::PrintAppliqueInfo => "printAppliqueInfo",
            Field::LabelInfo => "labelInfo",
            Field::HangTagInfo => "hangTagInfo",
            Field::PackagingInfo => "packagingInfo",
            Field::MeasurementsDetails => "measurementsDetails",
        }
    }

    pub fn from_name(name: &str) -> Result<Field, RecordError> {
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.name() == name)
            .ok_or_else(|| RecordError::UnknownField(name.to_string()))
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::FabricGsm | Field::TotalQuantity | Field::BrandingTotalPieces => {
                FieldKind::Number
            }
            Field::FabricType => FieldKind::FabricType,
            Field::SelectedSizes => FieldKind::Sizes,
            Field::InspirationPhoto | Field::TechnicalDrawing | Field::FabricSamplePhoto => {
                FieldKind::Attachment
            }
            _ => FieldKind::Text,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value submitted for one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    /// Raw numeric input. Empty input clears the field.
    Number(String),
    FabricType(Option<FabricType>),
    /// Replace the whole size selection.
    Sizes(Vec<Size>),
    /// Add the size if missing, remove it if present.
    ToggleSize(Size),
    Attachment(Option<Attachment>),
}

impl FieldValue {
    fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Number(_) => FieldKind::Number,
            FieldValue::FabricType(_) => FieldKind::FabricType,
            FieldValue::Sizes(_) | FieldValue::ToggleSize(_) => FieldKind::Sizes,
            FieldValue::Attachment(_) => FieldKind::Attachment,
        }
    }
}

/// A borrowed view of one field's current value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldRef<'a> {
    Text(&'a str),
    Number(Option<f64>),
    FabricType(Option<FabricType>),
    Sizes(&'a [Size]),
    Attachment(Option<&'a Attachment>),
}

impl Record {
    /// Return a new record with `field` set to `value`.
    ///
    /// Fails if the value shape doesn't match the field or a numeric input
    /// doesn't parse. The receiver is never modified.
    pub fn update(&self, field: Field, value: FieldValue) -> Result<Record, RecordError> {
        if field.kind() != value.kind() {
            return Err(RecordError::KindMismatch {
                field,
                expected: field.kind().describe(),
            });
        }

        let mut next = self.clone();
        match value {
            FieldValue::Text(text) => {
                if let Some(slot) = next.text_mut(field) {
                    *slot = text;
                }
            }
            FieldValue::Number(raw) => {
                let parsed = parse_number(field, &raw)?;
                if let Some(slot) = next.number_mut(field) {
                    *slot = parsed;
                }
            }
            FieldValue::FabricType(fabric) => next.fabric_type = fabric,
            FieldValue::Sizes(sizes) => {
                let mut deduped: Vec<Size> = Vec::with_capacity(sizes.len());
                for size in sizes {
                    if !deduped.contains(&size) {
                        deduped.push(size);
                    }
                }
                next.selected_sizes = deduped;
            }
            FieldValue::ToggleSize(size) => {
                if let Some(pos) = next.selected_sizes.iter().position(|s| *s == size) {
                    next.selected_sizes.remove(pos);
                } else {
                    next.selected_sizes.push(size);
                }
            }
            FieldValue::Attachment(attachment) => {
                if let Some(slot) = next.attachment_mut(field) {
                    *slot = attachment;
                }
            }
        }
        log::debug!("record field {} updated", field);
        Ok(next)
    }

    /// Read one field.
    pub fn get(&self, field: Field) -> FieldRef<'_> {
        match field {
            Field::FabricGsm => FieldRef::Number(self.fabric_gsm),
            Field::TotalQuantity => FieldRef::Number(self.total_quantity),
            Field::BrandingTotalPieces => FieldRef::Number(self.branding_total_pieces),
            Field::FabricType => FieldRef::FabricType(self.fabric_type),
            Field::SelectedSizes => FieldRef::Sizes(&self.selected_sizes),
            Field::InspirationPhoto => FieldRef::Attachment(self.inspiration_photo.as_ref()),
            Field::TechnicalDrawing => FieldRef::Attachment(self.technical_drawing.as_ref()),
            Field::FabricSamplePhoto => FieldRef::Attachment(self.fabric_sample_photo.as_ref()),
            text => FieldRef::Text(self.text(text).unwrap_or_default()),
        }
    }

    /// The fields whose values differ between two records.
    pub fn changed_fields(&self, other: &Record) -> Vec<Field> {
        Field::ALL
            .iter()
            .copied()
            .filter(|f| self.get(*f) != other.get(*f))
            .collect()
    }

    pub fn attachment(&self, field: Field) -> Option<&Attachment> {
        match self.get(field) {
            FieldRef::Attachment(a) => a,
            _ => None,
        }
    }

    fn text(&self, field: Field) -> Option<&str> {
        let s = match field {
            Field::Category => &self.category,
            Field::ModelCode => &self.model_code,
            Field::StyleName => &self.style_name,
            Field::BrandName => &self.brand_name,
            Field::ProductDescription => &self.product_description,
            Field::FabricContent => &self.fabric_content,
            Field::FabricColor => &self.fabric_color,
            Field::AssortiPackDetails => &self.assorti_pack_details,
            Field::DesignSpecDetails => &self.design_spec_details,
            Field::ArtNo => &self.art_no,
            Field::CollectionDate => &self.collection_date,
            Field::BackNeckLabel => &self.back_neck_label,
            Field::SewingTicket => &self.sewing_ticket,
            Field::PolyBagInfo => &self.poly_bag_info,
            Field::TissuePaperInfo => &self.tissue_paper_info,
            Field::SewingInstructions => &self.sewing_instructions,
            Field::PrintAppliqueInfo => &self.print_applique_info,
            Field::LabelInfo => &self.label_info,
            Field::HangTagInfo => &self.hang_tag_info,
            Field::PackagingInfo => &self.packaging_info,
            Field::MeasurementsDetails => &self.measurements_details,
            _ => return None,
        };
        Some(s)
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        let s = match field {
            Field::Category => &mut self.category,
            Field::ModelCode => &mut self.model_code,
            Field::StyleName => &mut self.style_name,
            Field::BrandName => &mut self.brand_name,
            Field::ProductDescription => &mut self.product_description,
            Field::FabricContent => &mut self.fabric_content,
            Field::FabricColor => &mut self.fabric_color,
            Field::AssortiPackDetails => &mut self.assorti_pack_details,
            Field::DesignSpecDetails => &mut self.design_spec_details,
            Field::ArtNo => &mut self.art_no,
            Field::CollectionDate => &mut self.collection_date,
            Field::BackNeckLabel => &mut self.back_neck_label,
            Field::SewingTicket => &mut self.sewing_ticket,
            Field::PolyBagInfo => &mut self.poly_bag_info,
            Field::TissuePaperInfo => &mut self.tissue_paper_info,
            Field::SewingInstructions => &mut self.sewing_instructions,
            Field::PrintAppliqueInfo => &mut self.print_applique_info,
            Field::LabelInfo => &mut self.label_info,
            Field::HangTagInfo => &mut self.hang_tag_info,
            Field::PackagingInfo => &mut self.packaging_info,
            Field::MeasurementsDetails => &mut self.measurements_details,
            _ => return None,
        };
        Some(s)
    }

    fn number_mut(&mut self, field: Field) -> Option<&mut Option<f64>> {
        match field {
            Field::FabricGsm => Some(&mut self.fabric_gsm),
            Field::TotalQuantity => Some(&mut self.total_quantity),
            Field::BrandingTotalPieces => Some(&mut self.branding_total_pieces),
            _ => None,
        }
    }

    fn attachment_mut(&mut self, field: Field) -> Option<&mut Option<Attachment>> {
        match field {
            Field::InspirationPhoto => Some(&mut self.inspiration_photo),
            Field::TechnicalDrawing => Some(&mut self.technical_drawing),
            Field::FabricSamplePhoto => Some(&mut self.fabric_sample_photo),
            _ => None,
        }
    }
}

/// Parse numeric form input. Blank input means "absent".
fn parse_number(field: Field, raw: &str) -> Result<Option<f64>, RecordError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(RecordError::InvalidNumber {
            field,
            input: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_prefill_brand_and_color() {
        let r = Record::default();
        assert_eq!(r.brand_name, "SAMO");
        assert_eq!(r.fabric_color, "#60a5fa");
        assert!(r.fabric_gsm.is_none());
        assert!(r.selected_sizes.is_empty());
        assert!(r.inspiration_photo.is_none());
    }

    #[test]
    fn every_field_round_trips_by_name() {
        for f in Field::ALL {
            assert_eq!(Field::from_name(f.name()), Ok(f));
        }
        assert_eq!(
            Field::from_name("fabricGsm"),
            Err(RecordError::UnknownField("fabricGsm".into()))
        );
    }

    #[test]
    fn text_update_changes_only_that_field() {
        let before = Record::default();
        let after = before
            .update(Field::StyleName, FieldValue::Text("LARGE TROUSERS".into()))
            .unwrap();
        assert_eq!(after.style_name, "LARGE TROUSERS");
        assert_eq!(before.changed_fields(&after), vec![Field::StyleName]);
        assert_eq!(before.style_name, "", "input record must be untouched");
    }

    #[test]
    fn every_text_field_updates_in_isolation() {
        let base = Record::default();
        for f in Field::ALL.iter().filter(|f| f.kind() == FieldKind::Text) {
            let next = base.update(*f, FieldValue::Text("x".into())).unwrap();
            assert_eq!(base.changed_fields(&next), vec![*f], "field {}", f);
            assert_eq!(next.get(*f), FieldRef::Text("x"));
        }
    }

    #[test]
    fn empty_number_input_is_absent() {
        let r = Record::default()
            .update(Field::FabricGsm, FieldValue::Number("250".into()))
            .unwrap();
        assert_eq!(r.fabric_gsm, Some(250.0));

        let cleared = r
            .update(Field::FabricGsm, FieldValue::Number(String::new()))
            .unwrap();
        assert_eq!(cleared.fabric_gsm, None);
    }

    #[test]
    fn zero_is_not_absent() {
        let r = Record::default()
            .update(Field::TotalQuantity, FieldValue::Number("0".into()))
            .unwrap();
        assert_eq!(r.total_quantity, Some(0.0));
    }

    #[test]
    fn malformed_number_rejected() {
        for bad in ["abc", "NaN", "inf", "12kg"] {
            let err = Record::default()
                .update(Field::BrandingTotalPieces, FieldValue::Number(bad.into()))
                .unwrap_err();
            assert!(matches!(err, RecordError::InvalidNumber { .. }), "{}", bad);
        }
    }

    #[test]
    fn kind_mismatch_rejected() {
        let err = Record::default()
            .update(Field::FabricGsm, FieldValue::Text("280".into()))
            .unwrap_err();
        assert_eq!(
            err,
            RecordError::KindMismatch {
                field: Field::FabricGsm,
                expected: "numeric"
            }
        );
    }

    #[test]
    fn toggle_twice_restores_contents() {
        let base = Record::default()
            .update(Field::SelectedSizes, FieldValue::Sizes(vec![Size::L, Size::S]))
            .unwrap();
        for size in Size::ALL {
            let once = base
                .update(Field::SelectedSizes, FieldValue::ToggleSize(size))
                .unwrap();
            let twice = once
                .update(Field::SelectedSizes, FieldValue::ToggleSize(size))
                .unwrap();
            if base.selected_sizes.contains(&size) {
                // Removing then re-adding moves the size to the end.
                assert!(twice.selected_sizes.contains(&size));
            } else {
                assert_eq!(twice.selected_sizes, base.selected_sizes);
            }
        }
    }

    #[test]
    fn toggle_keeps_selection_order() {
        let r = Record::default()
            .update(Field::SelectedSizes, FieldValue::ToggleSize(Size::M))
            .unwrap()
            .update(Field::SelectedSizes, FieldValue::ToggleSize(Size::S))
            .unwrap();
        assert_eq!(r.selected_sizes, vec![Size::M, Size::S]);
    }

    #[test]
    fn replacing_sizes_drops_duplicates() {
        let r = Record::default()
            .update(
                Field::SelectedSizes,
                FieldValue::Sizes(vec![Size::S, Size::M, Size::S]),
            )
            .unwrap();
        assert_eq!(r.selected_sizes, vec![Size::S, Size::M]);
    }

    #[test]
    fn attachment_set_and_clear() {
        let photo = Attachment::new("sample.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0]);
        let r = Record::default()
            .update(Field::FabricSamplePhoto, FieldValue::Attachment(Some(photo.clone())))
            .unwrap();
        assert_eq!(r.attachment(Field::FabricSamplePhoto), Some(&photo));
        let cleared = r
            .update(Field::FabricSamplePhoto, FieldValue::Attachment(None))
            .unwrap();
        assert_eq!(Record::default().changed_fields(&cleared), vec![]);
    }
}
