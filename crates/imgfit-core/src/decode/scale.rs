//! Width-bounded downscaling.
//!
//! The output dimensions are part of the contract and must be reproducible:
//! the height is always `floor(height * max_width / width)`, computed in
//! integer arithmetic. Pixel values depend on the chosen [`FilterType`].

use super::types::check_surface;
use super::{DecodeError, DecodedImage, FilterType};

/// Compute the dimensions an image scales to under a maximum width.
///
/// Images no wider than `max_width` keep their dimensions; nothing is ever
/// upscaled. Wider images become `max_width` wide with the height floored
/// so that it never overflows the true aspect ratio by a pixel.
///
/// # Example
///
/// ```
/// use imgfit_core::decode::scaled_dimensions;
///
/// assert_eq!(scaled_dimensions(2000, 1500, 1200), (1200, 900));
/// assert_eq!(scaled_dimensions(800, 600, 1200), (800, 600));
/// ```
pub fn scaled_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width {
        return (width, height);
    }

    let new_height = u64::from(height) * u64::from(max_width) / u64::from(width);
    // new_height <= height because max_width < width
    (max_width, new_height as u32)
}

/// Scale an image down so that it is at most `max_width` pixels wide.
///
/// Returns a clone when no scaling is needed.
///
/// # Errors
///
/// Returns `DecodeError::SurfaceAcquisition` if the scaled surface would be
/// empty (e.g. `max_width == 0`, or a very wide image whose height floors
/// to zero).
pub fn scale_to_width(
    image: &DecodedImage,
    max_width: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    let (width, height) = scaled_dimensions(image.width, image.height, max_width);
    resize(image, width, height, filter)
}

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::SurfaceAcquisition` if the target surface has zero
/// area or exceeds [`super::MAX_SURFACE_PIXELS`], and
/// `DecodeError::UnsupportedOrCorruptImage` if the source pixel buffer does
/// not match its dimensions.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    check_surface(width, height)?;

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let source = image.as_rgba_image().ok_or_else(|| {
        DecodeError::UnsupportedOrCorruptImage("pixel buffer size mismatch".to_string())
    })?;

    let resized = image::imageops::resize(&source, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgba_image(resized))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
