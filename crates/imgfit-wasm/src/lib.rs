//! imgfit WASM - WebAssembly bindings for imgfit
//!
//! This crate exposes the imgfit-core recompression pipeline to
//! JavaScript/TypeScript applications. It is meant to run inside a Web
//! Worker: every call is synchronous and CPU-bound.
//!
//! # Module Structure
//!
//! - `compress` - Pipeline entry points (`process_image_file`, `compress_image`)
//! - `data_url` - Conversions between bytes, data URLs and files
//! - `types` - WASM-compatible wrapper types for pipeline output
//! - `console` - Pipeline logging to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { process_image_file } from '@imgfit/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const out = process_image_file(bytes, file.name, file.type, file.lastModified, 100);
//! upload(new File([out.bytes()], out.name, { type: out.mediaType }));
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod console;
mod data_url;
mod types;

// Re-export public types
pub use compress::{compress_image, compress_image_with_options, process_image_file};
pub use console::ConsoleObserver;
pub use data_url::{bytes_to_data_url, data_url_to_bytes, data_url_to_file};
pub use types::{JsCompressionResult, JsImageFile};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // The pipeline keeps no global state; nothing to set up
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
