//! imgfit Core - Size-bounded image recompression
//!
//! This crate takes a user-supplied image and produces a JPEG no larger than
//! a caller-given byte budget: files already within budget pass through
//! untouched, larger ones are decoded, scaled down to a maximum width, and
//! re-encoded at decreasing quality until the output fits.
//!
//! ```ignore
//! use imgfit_core::{Compressor, RawPayload};
//!
//! let file = RawPayload::new(std::fs::read("photo.png")?, "image/png").with_name("photo.png");
//! let processed = Compressor::native().process_image_file(&file, 100, now_ms)?;
//! ```

pub mod codec;
pub mod config;
pub mod data_url;
pub mod decode;
pub mod encode;
pub mod error;
pub mod observe;
pub mod payload;
pub mod pipeline;
pub mod search;

#[cfg(test)]
mod testing;

pub use codec::{ImageCodec, NativeCodec};
pub use config::{CompressOptions, ConfigError, DEFAULT_MAX_WIDTH, DEFAULT_TARGET_SIZE_KB};
pub use data_url::{DataUrl, DataUrlError};
pub use decode::{DecodeError, DecodedImage, FilterType};
pub use encode::{EncodeError, OUTPUT_MEDIA_TYPE};
pub use error::{CompressError, ErrorKind, Result};
pub use observe::{NoopObserver, PipelineEvent, PipelineObserver, TracingObserver};
pub use payload::RawPayload;
pub use pipeline::{jpeg_file_from_url, result_to_file, Compressor, ProcessedImage};
pub use search::{search_quality, CompressionResult, MAX_ENCODE_ATTEMPTS};
