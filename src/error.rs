//! Structured error types for techpack generation.
//!
//! Record updates, image loading and input parsing each have their own
//! error type; `TechpackError` wraps them for the public entry points.

use crate::record::Field;

/// The unified error type returned by all public generation functions.
#[derive(Debug, thiserror::Error)]
pub enum TechpackError {
    /// JSON input failed to parse as a techpack form.
    #[error("Failed to parse form input: {source}{}", hint_suffix(.hint))]
    Parse {
        source: serde_json::Error,
        hint: String,
    },
    /// The form input or a field update was rejected.
    #[error(transparent)]
    Record(#[from] RecordError),
    /// An attachment could not be read or decoded. Generation stops here.
    #[error("Image error in {field}: {source}")]
    Image { field: Field, source: ImageError },
    /// Layout configuration is unusable.
    #[error("Config error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for TechpackError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't have the expected shape. The form must be a flat object of field names to values.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        TechpackError::Parse { source: e, hint }
    }
}

/// Rejected record updates.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("form input must be a JSON object of field names to values")]
    NotAnObject,
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("field {field} expects a {expected} value")]
    KindMismatch { field: Field, expected: &'static str },
    #[error("field {field}: '{input}' is not a number")]
    InvalidNumber { field: Field, input: String },
    #[error("field {field}: '{value}' is not one of the permitted values")]
    NotInRegistry { field: Field, value: String },
}

/// Failures while reading or decoding an attachment.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("image data too short")]
    TooShort,
    #[error("unsupported image format (expected JPEG, PNG or WebP)")]
    UnsupportedFormat,
    #[error("invalid data URI: {0}")]
    InvalidDataUri(&'static str),
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("failed to read image file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_carries_hint() {
        let err: TechpackError = serde_json::from_str::<serde_json::Value>("{\"a\": 1,}")
            .unwrap_err()
            .into();
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to parse form input"));
        assert!(msg.contains("Hint: Check for trailing commas"));
    }

    #[test]
    fn eof_hint() {
        let err: TechpackError = serde_json::from_str::<serde_json::Value>("{\"a\": ")
            .unwrap_err()
            .into();
        assert!(err.to_string().contains("truncated"));
    }

    #[test]
    fn record_error_is_transparent() {
        let err = TechpackError::from(RecordError::UnknownField("colour".into()));
        assert_eq!(err.to_string(), "unknown field 'colour'");
    }
}
