//! Lossy re-encoding for imgfit.
//!
//! This module provides functionality for:
//! - Encoding RGBA surfaces to JPEG with a `[0.0, 1.0]` quality knob
//!
//! JPEG is the only output format: it is the one lossy format whose single
//! quality scalar has a roughly monotonic relationship to output size, which
//! the quality search relies on.
//!
//! # Examples
//!
//! ```ignore
//! use imgfit_core::decode::DecodedImage;
//! use imgfit_core::encode::encode_jpeg;
//!
//! let image = DecodedImage::new(100, 100, vec![128u8; 100 * 100 * 4]);
//! let jpeg_bytes = encode_jpeg(&image, 0.9).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;

pub use jpeg::{encode_jpeg, jpeg_quality, EncodeError, FALLBACK_QUALITY};

/// Media type of every re-encoded image.
pub const OUTPUT_MEDIA_TYPE: &str = "image/jpeg";
