//! Bounded quality search against a byte budget.
//!
//! The surface is encoded at quality 0.9, 0.8, ... 0.1 until the output fits
//! the budget or the 0.1 floor is reached, whichever comes first:
//!
//! ```text
//!   step 0 ──encode──▶ fits? ──yes──▶ accept
//!                        │no
//!   step 1 ──encode──▶ fits? ──yes──▶ accept
//!                        ⋮
//!   step 8 ──encode──▶ accept (floor, even if over budget)
//! ```
//!
//! The quality is derived from an integer step counter, never by repeated
//! float subtraction, so the floor is hit exactly on the ninth encode.
//! The first fitting attempt wins; there is no search for the highest
//! quality that still fits.

use serde::Serialize;

use crate::codec::ImageCodec;
use crate::data_url::DataUrl;
use crate::decode::DecodedImage;
use crate::encode::{EncodeError, OUTPUT_MEDIA_TYPE};
use crate::observe::{PipelineEvent, PipelineObserver};

/// Quality of the first encode.
pub const INITIAL_QUALITY: f32 = 0.9;

/// Amount the quality drops between attempts.
pub const QUALITY_STEP: f32 = 0.1;

/// Lowest quality tried; an attempt at this quality is always accepted.
pub const MIN_QUALITY: f32 = 0.1;

/// Upper bound on encodes per search.
pub const MAX_ENCODE_ATTEMPTS: u32 = 9;

const INITIAL_TENTHS: u8 = 9;
const FLOOR_STEP: u8 = 8;

/// Quality for a step counter in `0..=8`: `0.9 - 0.1 * step`.
pub fn quality_for_step(step: u8) -> f32 {
    f32::from(INITIAL_TENTHS - step.min(FLOOR_STEP)) / 10.0
}

/// One encode of the search.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeAttempt {
    pub quality: f32,
    pub bytes: Vec<u8>,
}

impl EncodeAttempt {
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Outcome of a search: the accepted encoding and how it was reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionResult {
    /// The accepted JPEG as a data URL.
    pub data_url: DataUrl,
    /// Quality the accepted attempt was encoded at.
    pub quality: f32,
    /// Size of the accepted JPEG in bytes.
    pub size_bytes: u64,
    /// Number of encodes performed (1 to 9).
    pub attempts: u32,
    pub width: u32,
    pub height: u32,
    /// False when the search stopped at the quality floor over budget.
    pub within_target: bool,
}

/// Encode `image` at decreasing quality until it fits `target_bytes`.
///
/// Performs at most [`MAX_ENCODE_ATTEMPTS`] encodes. If none fits, the
/// attempt at [`MIN_QUALITY`] is returned with `within_target == false`.
///
/// # Errors
///
/// Any encoder failure ends the search immediately.
pub fn search_quality<C, O>(
    codec: &C,
    image: &DecodedImage,
    target_bytes: u64,
    observer: &O,
) -> Result<CompressionResult, EncodeError>
where
    C: ImageCodec + ?Sized,
    O: PipelineObserver + ?Sized,
{
    let mut step: u8 = 0;

    let (accepted, attempts, within_target) = loop {
        let quality = quality_for_step(step);
        let attempt = EncodeAttempt {
            quality,
            bytes: codec.encode(image, quality)?,
        };
        let attempts = u32::from(step) + 1;

        observer.on_event(&PipelineEvent::EncodeAttempt {
            attempt: attempts,
            quality,
            size_bytes: attempt.size_bytes(),
            target_bytes,
        });

        let within_target = attempt.size_bytes() <= target_bytes;
        if within_target || step == FLOOR_STEP {
            break (attempt, attempts, within_target);
        }
        step += 1;
    };

    observer.on_event(&PipelineEvent::Accepted {
        quality: accepted.quality,
        size_bytes: accepted.size_bytes(),
        attempts,
        within_target,
    });

    Ok(CompressionResult {
        data_url: DataUrl::encode(OUTPUT_MEDIA_TYPE, &accepted.bytes),
        quality: accepted.quality,
        size_bytes: accepted.size_bytes(),
        attempts,
        width: image.width,
        height: image.height,
        within_target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::NoopObserver;
    use crate::testing::{linear_size, FakeCodec, Recorder};

    fn surface() -> DecodedImage {
        DecodedImage::blank(4, 4).unwrap()
    }

    #[test]
    fn test_quality_schedule() {
        let schedule: Vec<f32> = (0..=FLOOR_STEP).map(quality_for_step).collect();
        assert_eq!(
            schedule,
            vec![0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3, 0.2, 0.1]
        );
        assert_eq!(quality_for_step(0), INITIAL_QUALITY);
        assert_eq!(quality_for_step(FLOOR_STEP), MIN_QUALITY);
        // Steps past the floor clamp to it
        assert_eq!(quality_for_step(200), MIN_QUALITY);
    }

    #[test]
    fn test_schedule_step_size() {
        for step in 0..FLOOR_STEP {
            let drop = quality_for_step(step) - quality_for_step(step + 1);
            assert!((drop - QUALITY_STEP).abs() < 1e-6);
        }
    }

    #[test]
    fn test_accepts_first_attempt_when_it_fits() {
        let codec = FakeCodec::new(4, 4, linear_size(1000));
        let result = search_quality(&codec, &surface(), 2000, &NoopObserver).unwrap();

        assert_eq!(result.attempts, 1);
        assert_eq!(result.quality, 0.9);
        assert_eq!(result.size_bytes, 900);
        assert!(result.within_target);
        assert_eq!(codec.encode_count(), 1);
    }

    #[test]
    fn test_stops_at_first_fitting_step() {
        // Sizes: 900, 800, 700, 600, ...; 650 is first met at 0.6
        let codec = FakeCodec::new(4, 4, linear_size(1000));
        let result = search_quality(&codec, &surface(), 650, &NoopObserver).unwrap();

        assert_eq!(result.attempts, 4);
        assert_eq!(result.quality, 0.6);
        assert_eq!(result.size_bytes, 600);
        assert!(result.within_target);
        assert_eq!(codec.qualities(), vec![0.9, 0.8, 0.7, 0.6]);
    }

    #[test]
    fn test_boundary_size_equal_to_target_fits() {
        let codec = FakeCodec::new(4, 4, |_, _, _| 1024);
        let result = search_quality(&codec, &surface(), 1024, &NoopObserver).unwrap();
        assert_eq!(result.attempts, 1);
        assert!(result.within_target);
    }

    #[test]
    fn test_floor_is_accepted_over_budget() {
        let codec = FakeCodec::new(4, 4, |_, _, _| 5000);
        let result = search_quality(&codec, &surface(), 100, &NoopObserver).unwrap();

        assert_eq!(result.attempts, MAX_ENCODE_ATTEMPTS);
        assert_eq!(result.quality, MIN_QUALITY);
        assert_eq!(result.size_bytes, 5000);
        assert!(!result.within_target);
        assert_eq!(codec.encode_count(), 9);
    }

    #[test]
    fn test_first_fit_wins_even_if_not_smallest() {
        // Non-monotonic encoder: 0.7 fits, 0.5 would be smaller
        let codec = FakeCodec::new(4, 4, |q, _, _| match (q * 10.0).round() as u32 {
            7 => 90,
            5 => 10,
            _ => 500,
        });
        let result = search_quality(&codec, &surface(), 100, &NoopObserver).unwrap();
        assert_eq!(result.quality, 0.7);
        assert_eq!(result.size_bytes, 90);
    }

    #[test]
    fn test_zero_target_ends_at_floor() {
        let codec = FakeCodec::new(4, 4, linear_size(10));
        let result = search_quality(&codec, &surface(), 0, &NoopObserver).unwrap();
        // 10 * 0.1 = 1 byte, still over a zero budget
        assert_eq!(result.attempts, 9);
        assert!(!result.within_target);
    }

    #[test]
    fn test_encode_failure_is_fatal() {
        let codec = FakeCodec::new(4, 4, |_, _, _| 5000).failing_encode_at(3);
        let result = search_quality(&codec, &surface(), 100, &NoopObserver);

        assert!(matches!(result, Err(EncodeError::EncodingFailed(_))));
        // No retry after the failure
        assert_eq!(codec.encode_count(), 3);
    }

    #[test]
    fn test_result_data_url_holds_accepted_bytes() {
        let codec = FakeCodec::new(4, 4, linear_size(100));
        let result = search_quality(&codec, &surface(), 1000, &NoopObserver).unwrap();

        let payload = result.data_url.decode().unwrap();
        assert_eq!(payload.media_type, "image/jpeg");
        assert_eq!(payload.size_bytes() as u64, result.size_bytes);
        assert_eq!(result.data_url.payload_len().unwrap() as u64, result.size_bytes);
        assert_eq!((result.width, result.height), (4, 4));
    }

    #[test]
    fn test_observer_sees_each_attempt() {
        let codec = FakeCodec::new(4, 4, linear_size(1000));
        let recorder = Recorder::default();
        search_quality(&codec, &surface(), 750, &recorder).unwrap();

        let events = recorder.events();
        assert_eq!(events.len(), 4);
        assert!(matches!(
            events[0],
            PipelineEvent::EncodeAttempt {
                attempt: 1,
                size_bytes: 900,
                target_bytes: 750,
                ..
            }
        ));
        assert_eq!(
            events[3],
            PipelineEvent::Accepted {
                quality: 0.7,
                size_bytes: 700,
                attempts: 3,
                within_target: true,
            }
        );
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let codec = FakeCodec::new(4, 4, |_, _, _| 3);
        let result = search_quality(&codec, &surface(), 10, &NoopObserver).unwrap();

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["dataUrl"], "data:image/jpeg;base64,Wlpa");
        assert_eq!(json["sizeBytes"], 3);
        assert_eq!(json["withinTarget"], true);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
