use wasm_bindgen::prelude::*;

/// Render a techpack form given as JSON, with attachments as data URIs.
#[wasm_bindgen]
pub fn render_techpack(json: &str) -> Result<Vec<u8>, JsValue> {
    crate::render_json(json)
        .map(|doc| doc.bytes)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// The file name the rendered document should be downloaded as.
#[wasm_bindgen]
pub fn document_file_name() -> String {
    crate::DOCUMENT_FILE_NAME.to_string()
}
