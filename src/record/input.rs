//! JSON form input.
//!
//! The input is a flat object of form keys to values. A record is built by
//! starting from the defaults and folding every entry through
//! [`Record::update`], so the JSON path obeys exactly the same rules as
//! interactive edits. Attachment values are image sources: a file path, a
//! `data:image/...;base64,` URI, or raw base64.

use serde_json::Value;

use super::{Attachment, Field, FieldKind, FieldValue, Record};
use crate::error::{RecordError, TechpackError};
use crate::image_loader;
use crate::registry::{FabricType, Size};

/// Parse a JSON form into a record.
pub fn from_json(json: &str) -> Result<Record, TechpackError> {
    let value: Value = serde_json::from_str(json)?;
    from_value(&value)
}

/// Build a record from an already-parsed JSON object.
pub fn from_value(value: &Value) -> Result<Record, TechpackError> {
    let object = match value {
        Value::Object(map) => map,
        _ => return Err(RecordError::NotAnObject.into()),
    };

    let mut record = Record::default();
    for (key, raw) in object {
        let field = Field::from_name(key)?;
        let value = field_value(field, raw)?;
        record = record.update(field, value)?;
    }
    log::debug!("parsed form input with {} fields", object.len());
    Ok(record)
}

fn field_value(field: Field, raw: &Value) -> Result<FieldValue, TechpackError> {
    let mismatch = || RecordError::KindMismatch {
        field,
        expected: match field.kind() {
            FieldKind::Text => "string",
            FieldKind::Number => "number or numeric string",
            FieldKind::FabricType => "fabric type name",
            FieldKind::Sizes => "array of size names",
            FieldKind::Attachment => "image source string",
        },
    };

    let value = match (field.kind(), raw) {
        (FieldKind::Text, Value::String(s)) => FieldValue::Text(s.clone()),
        (FieldKind::Text, Value::Number(n)) => FieldValue::Text(n.to_string()),
        (FieldKind::Text, Value::Null) => FieldValue::Text(String::new()),

        (FieldKind::Number, Value::String(s)) => FieldValue::Number(s.clone()),
        (FieldKind::Number, Value::Number(n)) => FieldValue::Number(n.to_string()),
        (FieldKind::Number, Value::Null) => FieldValue::Number(String::new()),

        (FieldKind::FabricType, Value::Null) => FieldValue::FabricType(None),
        (FieldKind::FabricType, Value::String(s)) if s.trim().is_empty() => {
            FieldValue::FabricType(None)
        }
        (FieldKind::FabricType, Value::String(s)) => {
            let fabric = s.parse::<FabricType>().map_err(|_| RecordError::NotInRegistry {
                field,
                value: s.clone(),
            })?;
            FieldValue::FabricType(Some(fabric))
        }

        (FieldKind::Sizes, Value::Null) => FieldValue::Sizes(Vec::new()),
        (FieldKind::Sizes, Value::Array(items)) => {
            let mut sizes = Vec::with_capacity(items.len());
            for item in items {
                let label = item.as_str().ok_or_else(mismatch)?;
                let size = label.parse::<Size>().map_err(|_| RecordError::NotInRegistry {
                    field,
                    value: label.to_string(),
                })?;
                sizes.push(size);
            }
            FieldValue::Sizes(sizes)
        }

        (FieldKind::Attachment, Value::Null) => FieldValue::Attachment(None),
        (FieldKind::Attachment, Value::String(src)) => {
            let bytes = image_loader::read_source(src)
                .map_err(|source| TechpackError::Image { field, source })?;
            FieldValue::Attachment(Some(Attachment::new(source_name(src), bytes)))
        }

        _ => return Err(mismatch().into()),
    };
    Ok(value)
}

/// A short human name for an image source, for log lines and errors.
fn source_name(src: &str) -> String {
    if src.starts_with("data:") {
        "inline data URI".to_string()
    } else if src.len() > 64 {
        "inline base64".to_string()
    } else {
        src.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let r = from_json("{}").unwrap();
        assert_eq!(r, Record::default());
    }

    #[test]
    fn mixed_fields() {
        let r = from_json(
            r#"{
                "category": "WOMEN",
                "fabricGSM": 280,
                "totalQuantity": "",
                "fabricType": "kaşkorse",
                "selectedSizes": ["S", "M"]
            }"#,
        )
        .unwrap();
        assert_eq!(r.category, "WOMEN");
        assert_eq!(r.fabric_gsm, Some(280.0));
        assert_eq!(r.total_quantity, None);
        assert_eq!(r.fabric_type, Some(FabricType::Kaskorse));
        assert_eq!(r.selected_sizes, vec![Size::S, Size::M]);
    }

    #[test]
    fn numeric_string_is_accepted() {
        let r = from_json(r#"{ "brandingTotalPieces": "250" }"#).unwrap();
        assert_eq!(r.branding_total_pieces, Some(250.0));
    }

    #[test]
    fn unknown_key_rejected() {
        let err = from_json(r#"{ "colour": "red" }"#).unwrap_err();
        assert!(matches!(
            err,
            TechpackError::Record(RecordError::UnknownField(ref k)) if k == "colour"
        ));
    }

    #[test]
    fn size_outside_registry_rejected() {
        let err = from_json(r#"{ "selectedSizes": ["S", "5XL"] }"#).unwrap_err();
        assert!(matches!(
            err,
            TechpackError::Record(RecordError::NotInRegistry { ref value, .. }) if value == "5XL"
        ));
    }

    #[test]
    fn fabric_outside_registry_rejected() {
        let err = from_json(r#"{ "fabricType": "denim" }"#).unwrap_err();
        assert!(matches!(
            err,
            TechpackError::Record(RecordError::NotInRegistry { .. })
        ));
    }

    #[test]
    fn wrong_shape_rejected() {
        let err = from_json(r#"{ "selectedSizes": "S" }"#).unwrap_err();
        assert!(matches!(
            err,
            TechpackError::Record(RecordError::KindMismatch { .. })
        ));
    }

    #[test]
    fn non_object_rejected() {
        assert!(matches!(
            from_json("[1, 2]").unwrap_err(),
            TechpackError::Record(RecordError::NotAnObject)
        ));
        let err = from_json("\"Knitwear\"").unwrap_err();
        assert!(err.to_string().contains("must be a JSON object"));
    }

    #[test]
    fn missing_image_file_is_an_image_error() {
        let err = from_json(r#"{ "technicalDrawing": "./does/not/exist.png" }"#).unwrap_err();
        assert!(matches!(
            err,
            TechpackError::Image {
                field: Field::TechnicalDrawing,
                ..
            }
        ));
    }
}
