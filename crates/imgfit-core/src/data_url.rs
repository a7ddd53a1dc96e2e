//! Conversion between binary payloads and `data:` URLs.
//!
//! Only the base64 flavour of RFC 2397 is produced or accepted:
//!
//! ```text
//! data:<media-type>;base64,<payload>
//! ```
//!
//! Decoding is as lenient as the browser's `atob`: ASCII whitespace inside the
//! payload is skipped, padding is optional and non-zero trailing bits are
//! accepted.

use std::fmt;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, PAD, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::payload::RawPayload;

const SCHEME: &str = "data:";
const BASE64_SUFFIX: &str = ";base64";

/// Media type assumed when the URL header does not name one.
pub const DEFAULT_MEDIA_TYPE: &str = "text/plain";

const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Errors raised while decoding a data URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataUrlError {
    /// The string does not start with `data:`.
    #[error("Malformed data URL: missing \"data:\" scheme")]
    MissingScheme,

    /// The header has no `;base64,` marker.
    #[error("Malformed data URL: missing \"base64,\" marker")]
    MissingBase64Marker,

    /// The payload segment is not valid base64.
    #[error("Malformed data URL: invalid base64 payload: {0}")]
    InvalidBase64(String),
}

/// A `data:` URL string.
///
/// Construction through [`DataUrl::encode`] always yields a well-formed URL.
/// Strings from outside are wrapped unchecked with `From<String>` and
/// validated when decoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataUrl(String);

impl DataUrl {
    /// Encode `bytes` as a base64 data URL with the given media type.
    pub fn encode(media_type: &str, bytes: &[u8]) -> Self {
        let encoded = STANDARD.encode(bytes);
        let capacity = SCHEME.len() + media_type.len() + BASE64_SUFFIX.len() + 1 + encoded.len();
        let mut url = String::with_capacity(capacity);
        url.push_str(SCHEME);
        url.push_str(media_type);
        url.push_str(BASE64_SUFFIX);
        url.push(',');
        url.push_str(&encoded);
        Self(url)
    }

    /// Encode a payload, keeping its declared media type.
    pub fn from_payload(payload: &RawPayload) -> Self {
        Self::encode(&payload.media_type, &payload.bytes)
    }

    /// Decode into a payload with no filename and a zero timestamp.
    ///
    /// # Errors
    ///
    /// Returns a [`DataUrlError`] if the scheme or the base64 marker is
    /// missing, or the payload is not valid base64.
    pub fn decode(&self) -> Result<RawPayload, DataUrlError> {
        let (media_type, payload) = self.split()?;
        let bytes = decode_base64(payload)?;
        Ok(RawPayload::new(bytes, media_type))
    }

    /// Media type named in the header, or [`DEFAULT_MEDIA_TYPE`] if empty.
    pub fn media_type(&self) -> Result<&str, DataUrlError> {
        self.split().map(|(media_type, _)| media_type)
    }

    /// Number of bytes the payload decodes to, computed from the base64
    /// length alone: `floor(len * 3 / 4) - padding`.
    pub fn payload_len(&self) -> Result<usize, DataUrlError> {
        let (_, payload) = self.split()?;
        let significant: Vec<u8> = payload
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        let padding = significant.iter().rev().take_while(|&&b| b == b'=').count();
        Ok((significant.len() * 3 / 4).saturating_sub(padding))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Length of the URL string in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Split into (media type, base64 payload).
    fn split(&self) -> Result<(&str, &str), DataUrlError> {
        let url = self.0.trim_start();
        let rest = match url.get(..SCHEME.len()) {
            Some(scheme) if scheme.eq_ignore_ascii_case(SCHEME) => &url[SCHEME.len()..],
            _ => return Err(DataUrlError::MissingScheme),
        };

        let (header, payload) = rest
            .split_once(',')
            .ok_or(DataUrlError::MissingBase64Marker)?;

        let marker_start = header
            .len()
            .checked_sub(BASE64_SUFFIX.len())
            .ok_or(DataUrlError::MissingBase64Marker)?;
        let (media_type, marker) = header
            .split_at_checked(marker_start)
            .ok_or(DataUrlError::MissingBase64Marker)?;
        if !marker.eq_ignore_ascii_case(BASE64_SUFFIX) {
            return Err(DataUrlError::MissingBase64Marker);
        }

        let media_type = media_type.trim();
        let media_type = if media_type.is_empty() {
            DEFAULT_MEDIA_TYPE
        } else {
            media_type
        };
        Ok((media_type, payload))
    }
}

fn decode_base64(payload: &str) -> Result<Vec<u8>, DataUrlError> {
    let compact: Vec<u8> = payload
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    LENIENT
        .decode(&compact)
        .map_err(|e| DataUrlError::InvalidBase64(e.to_string()))
}

impl From<String> for DataUrl {
    fn from(url: String) -> Self {
        Self(url)
    }
}

impl From<&str> for DataUrl {
    fn from(url: &str) -> Self {
        Self(url.to_string())
    }
}

impl From<DataUrl> for String {
    fn from(url: DataUrl) -> Self {
        url.0
    }
}

impl AsRef<str> for DataUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
