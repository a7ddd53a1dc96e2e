//! The platform image capabilities the pipeline drives.
//!
//! Decoding, resampling and encoding sit behind [`ImageCodec`] so the
//! pipeline and the quality search can run against deterministic fakes in
//! tests. [`NativeCodec`] binds the trait to the `image` crate.

use crate::decode::{self, DecodeError, DecodedImage, FilterType};
use crate::encode::{self, EncodeError};

/// Decode, resample and encode capabilities.
pub trait ImageCodec {
    /// Decode raw file bytes into an RGBA surface.
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError>;

    /// Resample `image` onto a new `width` x `height` surface.
    fn scale(
        &self,
        image: &DecodedImage,
        width: u32,
        height: u32,
    ) -> Result<DecodedImage, DecodeError>;

    /// Encode `image` in the lossy output format at `quality` (0.0 to 1.0).
    fn encode(&self, image: &DecodedImage, quality: f32) -> Result<Vec<u8>, EncodeError>;
}

impl<C: ImageCodec + ?Sized> ImageCodec for &C {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
        (**self).decode(bytes)
    }

    fn scale(
        &self,
        image: &DecodedImage,
        width: u32,
        height: u32,
    ) -> Result<DecodedImage, DecodeError> {
        (**self).scale(image, width, height)
    }

    fn encode(&self, image: &DecodedImage, quality: f32) -> Result<Vec<u8>, EncodeError> {
        (**self).encode(image, quality)
    }
}

/// [`ImageCodec`] backed by the `image` crate.
///
/// Stateless apart from the resampling filter, so a single instance can
/// serve any number of concurrent pipeline runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NativeCodec {
    /// Resampling filter used when scaling.
    pub filter: FilterType,
}

impl NativeCodec {
    pub fn new(filter: FilterType) -> Self {
        Self { filter }
    }
}

impl ImageCodec for NativeCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
        decode::decode_image(bytes)
    }

    fn scale(
        &self,
        image: &DecodedImage,
        width: u32,
        height: u32,
    ) -> Result<DecodedImage, DecodeError> {
        decode::resize(image, width, height, self.filter)
    }

    fn encode(&self, image: &DecodedImage, quality: f32) -> Result<Vec<u8>, EncodeError> {
        encode::encode_jpeg(image, quality)
    }
}
