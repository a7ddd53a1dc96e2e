//! The public entry points: file in, size-bounded file out.
//!
//! ```text
//! RawPayload ──▶ DataUrl ──▶ bytes ──decode──▶ DecodedImage ──scale──▶ surface
//!                                                                      │
//! RawPayload ◀── DataUrl ◀──────────── search_quality ◀────────────────┘
//! ```
//!
//! Files already within budget skip every step and come back untouched.

use crate::codec::{ImageCodec, NativeCodec};
use crate::config::{target_bytes, CompressOptions, DEFAULT_MAX_WIDTH};
use crate::data_url::{DataUrl, DataUrlError};
use crate::decode::scaled_dimensions;
use crate::encode::OUTPUT_MEDIA_TYPE;
use crate::error::Result;
use crate::observe::{PipelineEvent, PipelineObserver, TracingObserver};
use crate::payload::RawPayload;
use crate::search::{search_quality, CompressionResult};

/// What [`Compressor::process_image_file`] produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessedImage {
    /// The input was within budget and is returned as-is.
    Original(RawPayload),
    /// The input was re-encoded.
    Compressed {
        file: RawPayload,
        result: CompressionResult,
    },
}

impl ProcessedImage {
    pub fn file(&self) -> &RawPayload {
        match self {
            ProcessedImage::Original(file) => file,
            ProcessedImage::Compressed { file, .. } => file,
        }
    }

    pub fn into_file(self) -> RawPayload {
        match self {
            ProcessedImage::Original(file) => file,
            ProcessedImage::Compressed { file, .. } => file,
        }
    }

    /// The search outcome, if the file was re-encoded.
    pub fn result(&self) -> Option<&CompressionResult> {
        match self {
            ProcessedImage::Original(_) => None,
            ProcessedImage::Compressed { result, .. } => Some(result),
        }
    }

    pub fn was_compressed(&self) -> bool {
        matches!(self, ProcessedImage::Compressed { .. })
    }
}

/// Drives decode → scale → quality search for one image per call.
///
/// Holds no per-run state, so one `Compressor` can serve concurrent runs
/// whenever its codec and observer are `Sync`.
#[derive(Debug, Clone, Default)]
pub struct Compressor<C = NativeCodec, O = TracingObserver> {
    codec: C,
    observer: O,
}

impl Compressor {
    /// A compressor backed by the `image` crate that logs through `tracing`.
    pub fn native() -> Self {
        Self::default()
    }
}

impl<C, O> Compressor<C, O>
where
    C: ImageCodec,
    O: PipelineObserver,
{
    pub fn new(codec: C, observer: O) -> Self {
        Self { codec, observer }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Bound a user file to `target_size_kb`, scaling to the default
    /// maximum width of 1200 pixels.
    ///
    /// Files of at most `target_size_kb * 1024` bytes are returned unchanged
    /// without any encode. Otherwise the result is a JPEG carrying the
    /// original filename and `now_ms` as its modification time.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::CompressError`] from the pipeline stages.
    pub fn process_image_file(
        &self,
        file: &RawPayload,
        target_size_kb: u32,
        now_ms: u64,
    ) -> Result<ProcessedImage> {
        self.process_with_options(
            file,
            &CompressOptions::new(target_size_kb, DEFAULT_MAX_WIDTH),
            now_ms,
        )
    }

    /// [`Self::process_image_file`] with an explicit maximum width.
    pub fn process_with_options(
        &self,
        file: &RawPayload,
        options: &CompressOptions,
        now_ms: u64,
    ) -> Result<ProcessedImage> {
        // Options are checked by compress_image; a file within budget is
        // returned as-is whatever they say.
        let size_bytes = file.size_bytes() as u64;
        let budget = options.target_bytes();
        if size_bytes <= budget {
            self.observer.on_event(&PipelineEvent::ShortCircuit {
                size_bytes,
                target_bytes: budget,
            });
            return Ok(ProcessedImage::Original(file.clone()));
        }

        let url = DataUrl::from_payload(file);
        let result = self.compress_image(&url, options.target_size_kb, options.max_width)?;
        let compressed = result_to_file(&result, &file.name, now_ms)?;

        Ok(ProcessedImage::Compressed {
            file: compressed,
            result,
        })
    }

    /// Re-encode the image in `url` to fit `target_size_kb`, after scaling it
    /// down to at most `max_width` pixels wide.
    ///
    /// Unlike [`Self::process_image_file`] there is no short-circuit: the
    /// image is always decoded and re-encoded.
    ///
    /// # Errors
    ///
    /// - `MalformedEncoding` if `url` is not a base64 data URL
    /// - `UnsupportedOrCorruptImage` if the payload does not decode
    /// - `SurfaceAcquisition` if no surface of the needed size exists
    /// - `EncodeFailure` if the encoder fails
    /// - `InvalidOptions` if `max_width` is zero
    pub fn compress_image(
        &self,
        url: &DataUrl,
        target_size_kb: u32,
        max_width: u32,
    ) -> Result<CompressionResult> {
        CompressOptions::new(target_size_kb, max_width).validate()?;

        let payload = url.decode()?;
        let decoded = self.codec.decode(&payload.bytes)?;
        self.observer.on_event(&PipelineEvent::Decoded {
            width: decoded.width,
            height: decoded.height,
        });

        let from = (decoded.width, decoded.height);
        let to = scaled_dimensions(decoded.width, decoded.height, max_width);
        let surface = if to == from {
            decoded
        } else {
            let scaled = self.codec.scale(&decoded, to.0, to.1)?;
            self.observer.on_event(&PipelineEvent::Scaled { from, to });
            scaled
        };

        let result = search_quality(
            &self.codec,
            &surface,
            target_bytes(target_size_kb),
            &self.observer,
        )?;
        Ok(result)
    }

    /// [`Self::compress_image`] taking its settings from `options`.
    pub fn compress_with_options(
        &self,
        url: &DataUrl,
        options: &CompressOptions,
    ) -> Result<CompressionResult> {
        self.compress_image(url, options.target_size_kb, options.max_width)
    }
}

/// Turn a compression result back into a file-like payload.
///
/// The payload is tagged `image/jpeg`, keeps `original_name`, and carries
/// `now_ms` as its modification time.
///
/// # Errors
///
/// Returns a [`DataUrlError`] if the result's data URL is malformed.
pub fn result_to_file(
    result: &CompressionResult,
    original_name: &str,
    now_ms: u64,
) -> std::result::Result<RawPayload, DataUrlError> {
    jpeg_file_from_url(&result.data_url, original_name, now_ms)
}

/// [`result_to_file`] for a bare data URL, such as one handed back by a
/// caller that kept only [`CompressionResult::data_url`].
///
/// The declared media type of `url` is ignored; the payload is always
/// tagged `image/jpeg`.
pub fn jpeg_file_from_url(
    url: &DataUrl,
    original_name: &str,
    now_ms: u64,
) -> std::result::Result<RawPayload, DataUrlError> {
    let mut payload = url.decode()?;
    payload.media_type = OUTPUT_MEDIA_TYPE.to_string();
    Ok(payload.with_name(original_name).with_last_modified(now_ms))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
