//! Format-sniffing image decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageDecoder, ImageReader};

use super::types::check_surface;
use super::{DecodeError, DecodedImage, Orientation};

/// Decode an image from bytes into an RGBA surface.
///
/// The format is detected from the file signature, never from a declared
/// media type. EXIF orientation is applied to the pixels; the EXIF block and
/// any ICC profile are dropped.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedOrCorruptImage` for empty input, an
/// unrecognized signature, or a truncated or corrupt stream.
/// Returns `DecodeError::SurfaceAcquisition` if the image is larger than
/// [`super::MAX_SURFACE_PIXELS`].
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::UnsupportedOrCorruptImage(
            "empty input".to_string(),
        ));
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::UnsupportedOrCorruptImage(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::UnsupportedOrCorruptImage(
            "unrecognized image signature".to_string(),
        ));
    }

    let decoder = reader
        .into_decoder()
        .map_err(|e| DecodeError::UnsupportedOrCorruptImage(e.to_string()))?;

    // Refuse oversized images before allocating the pixel buffer
    let (width, height) = decoder.dimensions();
    check_surface(width, height)?;

    let img = DynamicImage::from_decoder(decoder)
        .map_err(|e| DecodeError::UnsupportedOrCorruptImage(e.to_string()))?;

    let oriented = apply_orientation(img, get_orientation(bytes));
    Ok(DecodedImage::from_rgba_image(oriented.into_rgba8()))
}

/// Extract the EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };

    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
