//! # Document Export
//!
//! Serializes laid-out pages and hands back the finished file under its
//! fixed download name.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TechpackError;
use crate::layout::LayoutPage;
use crate::pdf::{Metadata, PdfWriter};

/// Name every exported techpack is saved under.
pub const DOCUMENT_FILE_NAME: &str = "samo_techpack_order_form.pdf";

/// A finished document ready to be saved or downloaded.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportedDocument {
    /// Write the document into `dir` under its file name, replacing any
    /// existing file. Returns the written path.
    pub fn save_in(&self, dir: &Path) -> Result<PathBuf, TechpackError> {
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.bytes)?;
        log::info!("saved {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

/// Serialize pages to a PDF document.
pub fn export(pages: &[LayoutPage], metadata: &Metadata) -> Result<ExportedDocument, TechpackError> {
    if pages.is_empty() {
        return Err(TechpackError::Config(
            "nothing to export: the layout produced no pages".to_string(),
        ));
    }
    let bytes = PdfWriter::new().write(pages, metadata);
    log::info!("exported {} pages, {} bytes", pages.len(), bytes.len());
    Ok(ExportedDocument {
        file_name: DOCUMENT_FILE_NAME.to_string(),
        bytes,
    })
}
