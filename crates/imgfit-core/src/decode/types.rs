//! Core types for image decoding and scaling.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest drawing surface, in pixels, a decoded or scaled image may occupy.
///
/// Matches the 16384 x 16384 canvas area limit of desktop browsers.
pub const MAX_SURFACE_PIXELS: u64 = 16_384 * 16_384;

/// Error types for image decoding and scaling operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The decoder rejected the bytes: empty input, unknown signature,
    /// truncated stream or unsupported subformat.
    #[error("Unsupported or corrupt image: {0}")]
    UnsupportedOrCorruptImage(String),

    /// A drawing surface of the requested size could not be allocated.
    #[error("Cannot acquire a {width}x{height} drawing surface")]
    SurfaceAcquisition { width: u32, height: u32 },
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    /// Flip horizontal + rotate 270 CW.
    Transpose = 5,
    Rotate90CW = 6,
    /// Flip horizontal + rotate 90 CW.
    Transverse = 7,
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// A decoded image with RGBA pixel data.
///
/// This is the drawing surface every pipeline run owns exclusively: it is
/// never shared between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    /// Length should be width * height * 4.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a new DecodedImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 4,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Allocate a fully transparent surface of the given size.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::SurfaceAcquisition` for zero-area surfaces or
    /// surfaces larger than [`MAX_SURFACE_PIXELS`].
    pub fn blank(width: u32, height: u32) -> Result<Self, DecodeError> {
        check_surface(width, height)?;
        let pixels = vec![0u8; width as usize * height as usize * 4];
        Ok(Self::new(width, height, pixels))
    }

    /// Create a DecodedImage from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Borrow the pixels as an image::RgbaImage view for further processing.
    pub fn as_rgba_image(&self) -> Option<image::ImageBuffer<image::Rgba<u8>, &[u8]>> {
        image::ImageBuffer::from_raw(self.width, self.height, self.pixels.as_slice())
    }
}

/// Check that a drawing surface of `width` x `height` can be acquired.
pub(crate) fn check_surface(width: u32, height: u32) -> Result<(), DecodeError> {
    let area = u64::from(width) * u64::from(height);
    if area == 0 || area > MAX_SURFACE_PIXELS {
        return Err(DecodeError::SurfaceAcquisition { width, height });
    }
    Ok(())
}
