//! Compression pipeline WASM bindings.
//!
//! # Functions
//!
//! - [`process_image_file`] - Bound a user file to a size budget
//! - [`compress_image`] - Re-encode a data URL to fit a budget
//! - [`compress_image_with_options`] - Same, configured by an options object
//!
//! # Example
//!
//! ```typescript
//! import { process_image_file } from '@imgfit/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const out = process_image_file(bytes, file.name, file.type, file.lastModified, 100);
//! if (out.compressed) {
//!   console.log(`quality ${out.result.quality}, ${out.size} bytes`);
//! }
//! ```
//!
//! Errors reach JavaScript as strings of the form `"<code>: <message>"`,
//! where `<code>` is one of `malformed_encoding`,
//! `unsupported_or_corrupt_image`, `encode_failure`, `surface_acquisition`
//! or `invalid_options`.

use crate::console::ConsoleObserver;
use crate::types::{timestamp_from_js, JsCompressionResult, JsImageFile};
use imgfit_core::{
    CompressError, CompressOptions, CompressionResult, Compressor, DataUrl, FilterType,
    ImageCodec, NativeCodec, PipelineObserver, RawPayload, DEFAULT_MAX_WIDTH,
    DEFAULT_TARGET_SIZE_KB,
};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

/// Options object accepted by [`compress_image_with_options`].
///
/// Every field is optional:
///
/// ```typescript
/// { targetSizeKb: 200, maxWidth: 1600, filter: "lanczos3" }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct JsCompressOptions {
    target_size_kb: Option<u32>,
    max_width: Option<u32>,
    filter: Option<FilterType>,
}

impl JsCompressOptions {
    pub(crate) fn options(&self) -> CompressOptions {
        CompressOptions::new(
            self.target_size_kb.unwrap_or(DEFAULT_TARGET_SIZE_KB),
            self.max_width.unwrap_or(DEFAULT_MAX_WIDTH),
        )
    }

    pub(crate) fn codec(&self) -> NativeCodec {
        NativeCodec::new(self.filter.unwrap_or_default())
    }
}

/// Bound an image file to `target_size_kb` kilobytes (default 100).
///
/// Files already within budget are returned unchanged. Larger files are
/// scaled to at most 1200 pixels wide and re-encoded as JPEG; the result
/// keeps `name` and is stamped with the current time.
///
/// # Arguments
///
/// * `bytes` - File contents
/// * `name` - Original filename
/// * `media_type` - Declared MIME type, e.g. `file.type`
/// * `last_modified` - `file.lastModified` in milliseconds
/// * `target_size_kb` - Size budget in kilobytes (1 KB = 1024 bytes)
#[wasm_bindgen]
pub fn process_image_file(
    bytes: Vec<u8>,
    name: &str,
    media_type: &str,
    last_modified: f64,
    target_size_kb: Option<u32>,
) -> Result<JsImageFile, JsValue> {
    let file = RawPayload::new(bytes, media_type)
        .with_name(name)
        .with_last_modified(timestamp_from_js(last_modified));
    let compressor = Compressor::new(NativeCodec::default(), ConsoleObserver);

    process(
        &compressor,
        &file,
        target_size_kb.unwrap_or(DEFAULT_TARGET_SIZE_KB),
        now_ms(),
    )
    .map_err(to_js_error)
}

/// Re-encode the image in `data_url` as a JPEG of at most `target_size_kb`
/// kilobytes (default 100), scaled to at most `max_width` pixels wide
/// (default 1200).
///
/// Unlike [`process_image_file`] this always decodes and re-encodes, even
/// when the input is already small.
#[wasm_bindgen]
pub fn compress_image(
    data_url: &str,
    target_size_kb: Option<u32>,
    max_width: Option<u32>,
) -> Result<JsCompressionResult, JsValue> {
    let options = CompressOptions::new(
        target_size_kb.unwrap_or(DEFAULT_TARGET_SIZE_KB),
        max_width.unwrap_or(DEFAULT_MAX_WIDTH),
    );
    let compressor = Compressor::new(NativeCodec::default(), ConsoleObserver);

    compress(&compressor, data_url, &options)
        .map(JsCompressionResult::from)
        .map_err(to_js_error)
}

/// [`compress_image`] configured by an options object
/// (`{ targetSizeKb?, maxWidth?, filter? }`).
///
/// # Errors
///
/// Returns an `invalid_options` error if `options` is not such an object.
#[wasm_bindgen]
pub fn compress_image_with_options(
    data_url: &str,
    options: JsValue,
) -> Result<JsCompressionResult, JsValue> {
    let options: JsCompressOptions = if options.is_undefined() || options.is_null() {
        JsCompressOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| {
            JsValue::from_str(&format!("invalid_options: Invalid options object: {}", e))
        })?
    };
    let compressor = Compressor::new(options.codec(), ConsoleObserver);

    compress(&compressor, data_url, &options.options())
        .map(JsCompressionResult::from)
        .map_err(to_js_error)
}

pub(crate) fn process<C, O>(
    compressor: &Compressor<C, O>,
    file: &RawPayload,
    target_size_kb: u32,
    now_ms: u64,
) -> Result<JsImageFile, CompressError>
where
    C: ImageCodec,
    O: PipelineObserver,
{
    compressor
        .process_image_file(file, target_size_kb, now_ms)
        .map(JsImageFile::from)
}

pub(crate) fn compress<C, O>(
    compressor: &Compressor<C, O>,
    data_url: &str,
    options: &CompressOptions,
) -> Result<CompressionResult, CompressError>
where
    C: ImageCodec,
    O: PipelineObserver,
{
    compressor.compress_with_options(&DataUrl::from(data_url), options)
}

/// `"<code>: <message>"` for a pipeline error.
pub(crate) fn error_message(err: &CompressError) -> String {
    format!("{}: {}", err.kind().code(), err)
}

pub(crate) fn to_js_error(err: CompressError) -> JsValue {
    JsValue::from_str(&error_message(&err))
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub(crate) fn now_ms() -> u64 {
    timestamp_from_js(js_sys::Date::now())
}

/// Tests for compress bindings.
///
/// The exported functions return `Result<T, JsValue>` and log through
/// `web_sys`, which only work on wasm32 targets. These tests drive the
/// crate-internal helpers with a silent observer instead.
#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use imgfit_core::{ErrorKind, NoopObserver};

    const NOW: u64 = 1_760_000_000_000;

    fn gradient_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8])
        });
        let mut bytes = std::io::Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut bytes, ImageFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    fn silent(filter: FilterType) -> Compressor<NativeCodec, NoopObserver> {
        Compressor::new(NativeCodec::new(filter), NoopObserver)
    }

    #[test]
    fn test_process_small_file_unchanged() {
        let file = RawPayload::new(vec![9; 100], "image/gif")
            .with_name("tiny.gif")
            .with_last_modified(5);

        let out = process(&silent(FilterType::Bilinear), &file, 100, NOW).unwrap();

        assert!(!out.compressed());
        assert_eq!(out.payload(), &file);
        assert_eq!(out.last_modified(), 5.0);
    }

    #[test]
    fn test_process_large_file_compressed() {
        let png = gradient_png(1500, 300);
        let file = RawPayload::new(png, "image/png").with_name("wide.png");

        let out = process(&silent(FilterType::Bilinear), &file, 0, NOW).unwrap();

        assert!(out.compressed());
        assert_eq!(out.name(), "wide.png");
        assert_eq!(out.media_type(), "image/jpeg");
        assert_eq!(out.last_modified(), NOW as f64);
        let result = out.result().unwrap();
        assert_eq!((result.width(), result.height()), (1200, 240));
        // A zero budget always ends at the floor
        assert_eq!(result.attempts(), 9);
        assert!(!result.within_target());
    }

    #[test]
    fn test_compress_with_filter_and_width() {
        let url = DataUrl::encode("image/png", &gradient_png(64, 32));
        let options = JsCompressOptions {
            target_size_kb: Some(100),
            max_width: Some(16),
            filter: Some(FilterType::Lanczos3),
        };

        let result = compress(&silent(FilterType::Lanczos3), url.as_str(), &options.options())
            .unwrap();

        assert_eq!((result.width, result.height), (16, 8));
        assert_eq!(result.attempts, 1);
        assert!(result.within_target);
    }

    #[test]
    fn test_options_defaults() {
        let options = JsCompressOptions::default();
        assert_eq!(options.options(), CompressOptions::default());
        assert_eq!(options.codec().filter, FilterType::Bilinear);
    }

    #[test]
    fn test_options_deserialize() {
        let options: JsCompressOptions =
            serde_json::from_str(r#"{"maxWidth":800,"filter":"nearest"}"#).unwrap();
        assert_eq!(options.options(), CompressOptions::new(100, 800));
        assert_eq!(options.codec().filter, FilterType::Nearest);
    }

    #[test]
    fn test_malformed_url_message() {
        let err = compress(
            &silent(FilterType::Bilinear),
            "not a data url",
            &CompressOptions::default(),
        )
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::MalformedEncoding);
        assert!(error_message(&err).starts_with("malformed_encoding: "));
    }

    #[test]
    fn test_empty_image_message() {
        let err = compress(
            &silent(FilterType::Bilinear),
            "data:image/jpeg;base64,",
            &CompressOptions::default(),
        )
        .unwrap_err();

        assert!(error_message(&err).starts_with("unsupported_or_corrupt_image: "));
    }

    #[test]
    fn test_zero_width_message() {
        let url = DataUrl::encode("image/png", &gradient_png(4, 4));
        let err = compress(
            &silent(FilterType::Bilinear),
            url.as_str(),
            &CompressOptions::new(100, 0),
        )
        .unwrap_err();

        assert!(error_message(&err).starts_with("invalid_options: "));
    }
}
