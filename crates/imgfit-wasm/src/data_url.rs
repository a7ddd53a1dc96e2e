//! Data URL WASM bindings.
//!
//! Helpers for moving between raw bytes, data URLs and file-like payloads:
//!
//! ```typescript
//! const result = compress_image(url, 100);
//! const out = data_url_to_file(result.dataUrl, "photo.jpg");
//! const file = new File([out.bytes()], out.name, { type: out.mediaType });
//! ```

use crate::compress::{now_ms, to_js_error};
use crate::types::JsImageFile;
use imgfit_core::{jpeg_file_from_url, DataUrl};
use wasm_bindgen::prelude::*;

/// Encode `bytes` as a `data:<media_type>;base64,...` string.
#[wasm_bindgen]
pub fn bytes_to_data_url(bytes: &[u8], media_type: &str) -> String {
    DataUrl::encode(media_type, bytes).into_string()
}

/// Decode the payload of a base64 data URL.
///
/// # Errors
///
/// Returns a `malformed_encoding` error if `data_url` is not a base64 data URL.
#[wasm_bindgen]
pub fn data_url_to_bytes(data_url: &str) -> Result<Vec<u8>, JsValue> {
    DataUrl::from(data_url)
        .decode()
        .map(|payload| payload.bytes)
        .map_err(|e| to_js_error(e.into()))
}

/// Turn a compressed data URL back into a file named `name`.
///
/// The file is always tagged `image/jpeg` and stamped with the current time.
#[wasm_bindgen]
pub fn data_url_to_file(data_url: &str, name: &str) -> Result<JsImageFile, JsValue> {
    jpeg_file_from_url(&DataUrl::from(data_url), name, now_ms())
        .map(JsImageFile::from_payload)
        .map_err(|e| to_js_error(e.into()))
}
