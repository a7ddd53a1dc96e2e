//! JPEG encoding of RGBA surfaces.
//!
//! Behaves like a canvas `toDataURL("image/jpeg", quality)` call: the
//! quality is a float in `[0.0, 1.0]`, and transparent pixels are composited
//! over black because JPEG has no alpha channel.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use thiserror::Error;

use crate::decode::DecodedImage;

/// Quality used when the requested one is outside `[0.0, 1.0]`.
pub const FALLBACK_QUALITY: f32 = 0.92;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Map a `[0.0, 1.0]` quality onto the encoder's 1-100 scale.
///
/// Out-of-range and non-finite values fall back to [`FALLBACK_QUALITY`].
pub fn jpeg_quality(quality: f32) -> u8 {
    let quality = if (0.0..=1.0).contains(&quality) {
        quality
    } else {
        FALLBACK_QUALITY
    };
    ((quality * 100.0).round() as u8).clamp(1, 100)
}

/// Encode an RGBA surface to JPEG bytes.
///
/// # Arguments
///
/// * `image` - RGBA surface to encode
/// * `quality` - Quality in `[0.0, 1.0]`; higher means larger, better output
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for zero-sized surfaces,
/// `EncodeError::InvalidPixelData` if the buffer length does not match the
/// dimensions, and `EncodeError::EncodingFailed` if the encoder itself fails.
pub fn encode_jpeg(image: &DecodedImage, quality: f32) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (image.width, image.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 4;
    if image.pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: image.pixels.len(),
        });
    }

    let rgb = flatten_over_black(&image.pixels);

    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, jpeg_quality(quality));
    encoder
        .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer)
}

/// Drop the alpha channel, premultiplying each color sample by it.
fn flatten_over_black(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        let alpha = u16::from(px[3]);
        for &c in &px[..3] {
            rgb.push(((u16::from(c) * alpha + 127) / 255) as u8);
        }
    }
    rgb
}


// ============================================================================
// Property-Based Tests
// ============================================================================
