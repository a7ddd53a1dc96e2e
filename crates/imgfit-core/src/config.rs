//! Caller-tunable compression settings.
//!
//! Only the size budget and the maximum width are configurable. The quality
//! schedule of the search (start 0.9, step 0.1, floor 0.1) is fixed; see
//! [`crate::search`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default size budget in kilobytes (1 KB = 1024 bytes).
pub const DEFAULT_TARGET_SIZE_KB: u32 = 100;

/// Default maximum output width in pixels.
pub const DEFAULT_MAX_WIDTH: u32 = 1200;

/// Errors raised by [`CompressOptions::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid options: max width must be greater than zero")]
    ZeroMaxWidth,
}

/// Size budget and scaling limit for one compression run.
///
/// Deserializes from a camelCase object in which every field is optional:
///
/// ```json
/// { "targetSizeKb": 200, "maxWidth": 1600 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompressOptions {
    /// Size budget in kilobytes. Zero is allowed; the search then always
    /// ends at the quality floor.
    pub target_size_kb: u32,
    /// Images wider than this are scaled down to it.
    pub max_width: u32,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            target_size_kb: DEFAULT_TARGET_SIZE_KB,
            max_width: DEFAULT_MAX_WIDTH,
        }
    }
}

impl CompressOptions {
    pub fn new(target_size_kb: u32, max_width: u32) -> Self {
        Self {
            target_size_kb,
            max_width,
        }
    }

    /// The size budget in bytes.
    pub fn target_bytes(&self) -> u64 {
        target_bytes(self.target_size_kb)
    }

    /// Check that the options describe a run that can produce an image.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_width == 0 {
            return Err(ConfigError::ZeroMaxWidth);
        }
        Ok(())
    }
}

/// Convert a kilobyte budget into bytes.
pub fn target_bytes(target_size_kb: u32) -> u64 {
    u64::from(target_size_kb) * 1024
}
