//! WASM-compatible wrapper types for pipeline output.
//!
//! This module provides JavaScript-friendly types that wrap the core imgfit types,
//! handling the conversion between Rust and JavaScript data representations.

use imgfit_core::{CompressionResult, ProcessedImage, RawPayload};
use wasm_bindgen::prelude::*;

/// Outcome of a quality search, for JavaScript.
///
/// Mirrors the core `CompressionResult`; byte sizes are exposed as `number`.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsCompressionResult {
    data_url: String,
    quality: f64,
    size_bytes: u64,
    attempts: u32,
    width: u32,
    height: u32,
    within_target: bool,
}

#[wasm_bindgen]
impl JsCompressionResult {
    /// The accepted JPEG as a `data:image/jpeg;base64,...` string
    #[wasm_bindgen(getter, js_name = dataUrl)]
    pub fn data_url(&self) -> String {
        self.data_url.clone()
    }

    /// Quality of the accepted encode (0.1 to 0.9), exact to the tenth
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> f64 {
        self.quality
    }

    /// Size of the accepted JPEG in bytes
    #[wasm_bindgen(getter, js_name = sizeBytes)]
    pub fn size_bytes(&self) -> f64 {
        self.size_bytes as f64
    }

    /// Number of encodes performed
    #[wasm_bindgen(getter)]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// False when even the lowest quality exceeded the budget
    #[wasm_bindgen(getter, js_name = withinTarget)]
    pub fn within_target(&self) -> bool {
        self.within_target
    }
}

impl From<CompressionResult> for JsCompressionResult {
    fn from(result: CompressionResult) -> Self {
        Self {
            data_url: result.data_url.into_string(),
            quality: quality_to_js(result.quality),
            size_bytes: result.size_bytes,
            attempts: result.attempts,
            width: result.width,
            height: result.height,
            within_target: result.within_target,
        }
    }
}

/// A file-like payload for JavaScript.
///
/// Carries everything needed to build a browser `File`:
///
/// ```typescript
/// const out = process_image_file(bytes, file.name, file.type, file.lastModified);
/// const file = new File([out.bytes()], out.name, {
///   type: out.mediaType,
///   lastModified: out.lastModified,
/// });
/// ```
///
/// # Memory Management
///
/// The bytes live in WASM memory. `bytes()` copies them into a fresh
/// `Uint8Array`; the generated `free()` releases a large payload early.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsImageFile {
    payload: RawPayload,
    result: Option<JsCompressionResult>,
}

#[wasm_bindgen]
impl JsImageFile {
    /// Returns the file contents as Uint8Array.
    ///
    /// Note: This creates a copy of the data.
    pub fn bytes(&self) -> Vec<u8> {
        self.payload.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.payload.name.clone()
    }

    #[wasm_bindgen(getter, js_name = mediaType)]
    pub fn media_type(&self) -> String {
        self.payload.media_type.clone()
    }

    /// Milliseconds since the Unix epoch
    #[wasm_bindgen(getter, js_name = lastModified)]
    pub fn last_modified(&self) -> f64 {
        self.payload.last_modified_ms as f64
    }

    /// File size in bytes
    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.payload.size_bytes()
    }

    /// Whether the file was re-encoded (false when returned unchanged)
    #[wasm_bindgen(getter)]
    pub fn compressed(&self) -> bool {
        self.result.is_some()
    }

    /// Search details, or `undefined` when the file was returned unchanged
    #[wasm_bindgen(getter)]
    pub fn result(&self) -> Option<JsCompressionResult> {
        self.result.clone()
    }
}

impl JsImageFile {
    pub(crate) fn from_payload(payload: RawPayload) -> Self {
        Self {
            payload,
            result: None,
        }
    }

    /// The wrapped payload, for handing back to core functions.
    #[allow(dead_code)] // Used by tests
    pub(crate) fn payload(&self) -> &RawPayload {
        &self.payload
    }
}

impl From<ProcessedImage> for JsImageFile {
    fn from(processed: ProcessedImage) -> Self {
        match processed {
            ProcessedImage::Original(payload) => Self::from_payload(payload),
            ProcessedImage::Compressed { file, result } => Self {
                payload: file,
                result: Some(result.into()),
            },
        }
    }
}

/// Widen a search quality to the nearest tenth as an `f64`.
///
/// The search only produces tenths. A plain widening of `0.1f32` gives
/// `0.10000000149011612`.
pub(crate) fn quality_to_js(quality: f32) -> f64 {
    f64::from((quality * 10.0).round()) / 10.0
}

/// Convert a JavaScript millisecond timestamp to the core representation.
///
/// Negative, NaN and infinite values become 0.
pub(crate) fn timestamp_from_js(ms: f64) -> u64 {
    if ms.is_finite() && ms > 0.0 {
        ms as u64
    } else {
        0
    }
}
