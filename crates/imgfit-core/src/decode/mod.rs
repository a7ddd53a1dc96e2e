//! Image decoding and scaling for imgfit.
//!
//! This module provides functionality for:
//! - Decoding JPEG, PNG, GIF, WebP and BMP images into RGBA surfaces
//! - Applying EXIF orientation during decode
//! - Width-bounded downscaling with exact, reproducible output dimensions
//!
//! # Architecture
//!
//! The functions here back [`crate::codec::NativeCodec`]. All operations are
//! synchronous and single-threaded within WASM.
//!
//! # Examples
//!
//! ```ignore
//! use imgfit_core::decode::{decode_image, scale_to_width, FilterType};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! let scaled = scale_to_width(&image, 1200, FilterType::Bilinear).unwrap();
//! println!("Scaled to {}x{}", scaled.width, scaled.height);
//! ```

mod decoder;
mod scale;
mod types;

pub use decoder::{decode_image, get_orientation};
pub use scale::{resize, scale_to_width, scaled_dimensions};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation, MAX_SURFACE_PIXELS};
