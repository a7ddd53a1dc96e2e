//! File-like binary payloads handed in by the caller.

use serde::{Deserialize, Serialize};

/// An opaque byte sequence with the metadata a browser `File` carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPayload {
    /// File contents.
    pub bytes: Vec<u8>,
    /// Declared media type (e.g. "image/jpeg").
    pub media_type: String,
    /// Original filename. Empty when the payload did not come from a file.
    pub name: String,
    /// Last modification time in milliseconds since the Unix epoch.
    pub last_modified_ms: u64,
}

impl RawPayload {
    /// Create a payload with no filename and a zero timestamp.
    pub fn new(bytes: Vec<u8>, media_type: impl Into<String>) -> Self {
        Self {
            bytes,
            media_type: media_type.into(),
            name: String::new(),
            last_modified_ms: 0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_last_modified(mut self, last_modified_ms: u64) -> Self {
        self.last_modified_ms = last_modified_ms;
        self
    }

    /// Size of the payload in bytes.
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_builder() {
        let payload = RawPayload::new(vec![1, 2, 3], "image/png")
            .with_name("cat.png")
            .with_last_modified(1_700_000_000_000);

        assert_eq!(payload.size_bytes(), 3);
        assert_eq!(payload.media_type, "image/png");
        assert_eq!(payload.name, "cat.png");
        assert_eq!(payload.last_modified_ms, 1_700_000_000_000);
        assert!(!payload.is_empty());
    }

    #[test]
    fn test_empty_payload() {
        let payload = RawPayload::new(Vec::new(), "image/jpeg");
        assert!(payload.is_empty());
        assert_eq!(payload.size_bytes(), 0);
        assert!(payload.name.is_empty());
    }
}
