use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;
use crate::data_url::DataUrlError;
use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Any failure of a pipeline run.
///
/// Every variant is terminal: nothing is retried and no partial result is
/// returned. Component errors are carried unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompressError {
    #[error(transparent)]
    DataUrl(#[from] DataUrlError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Coarse classification of a [`CompressError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The data URL string is malformed.
    MalformedEncoding,
    /// The decoder rejected the image bytes.
    UnsupportedOrCorruptImage,
    /// The encoder rejected the surface.
    EncodeFailure,
    /// No drawing surface of the needed size was available.
    SurfaceAcquisition,
    /// The caller passed unusable options.
    InvalidOptions,
}

impl ErrorKind {
    /// Stable snake_case identifier, suitable for error codes.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::MalformedEncoding => "malformed_encoding",
            ErrorKind::UnsupportedOrCorruptImage => "unsupported_or_corrupt_image",
            ErrorKind::EncodeFailure => "encode_failure",
            ErrorKind::SurfaceAcquisition => "surface_acquisition",
            ErrorKind::InvalidOptions => "invalid_options",
        }
    }
}

impl CompressError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompressError::DataUrl(_) => ErrorKind::MalformedEncoding,
            CompressError::Decode(DecodeError::UnsupportedOrCorruptImage(_)) => {
                ErrorKind::UnsupportedOrCorruptImage
            }
            CompressError::Decode(DecodeError::SurfaceAcquisition { .. }) => {
                ErrorKind::SurfaceAcquisition
            }
            CompressError::Encode(_) => ErrorKind::EncodeFailure,
            CompressError::Config(_) => ErrorKind::InvalidOptions,
        }
    }
}

pub type Result<T> = std::result::Result<T, CompressError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let cases = [
            (
                CompressError::from(DataUrlError::MissingBase64Marker),
                ErrorKind::MalformedEncoding,
            ),
            (
                CompressError::from(DecodeError::UnsupportedOrCorruptImage("x".into())),
                ErrorKind::UnsupportedOrCorruptImage,
            ),
            (
                CompressError::from(DecodeError::SurfaceAcquisition {
                    width: 0,
                    height: 0,
                }),
                ErrorKind::SurfaceAcquisition,
            ),
            (
                CompressError::from(EncodeError::EncodingFailed("x".into())),
                ErrorKind::EncodeFailure,
            ),
            (
                CompressError::from(ConfigError::ZeroMaxWidth),
                ErrorKind::InvalidOptions,
            ),
        ];

        for (err, kind) in cases {
            assert_eq!(err.kind(), kind, "{err}");
        }
    }

    #[test]
    fn test_messages_pass_through_unchanged() {
        let inner = DataUrlError::MissingScheme;
        let err = CompressError::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
    }

    #[test]
    fn test_kind_codes() {
        assert_eq!(ErrorKind::MalformedEncoding.code(), "malformed_encoding");
        assert_eq!(ErrorKind::SurfaceAcquisition.code(), "surface_acquisition");
    }
}
