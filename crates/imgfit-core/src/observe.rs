//! Observability hook for pipeline runs.
//!
//! The pipeline never logs directly. It reports [`PipelineEvent`]s to the
//! [`PipelineObserver`] it was built with; [`TracingObserver`] forwards them
//! as structured `tracing` events, and tests can record them instead.

use tracing::{debug, info};

/// Something that happened during a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    /// The input was already within budget and is returned unchanged.
    ShortCircuit { size_bytes: u64, target_bytes: u64 },
    /// The input decoded to a surface of this size.
    Decoded { width: u32, height: u32 },
    /// The surface was scaled down to fit the maximum width.
    Scaled {
        from: (u32, u32),
        to: (u32, u32),
    },
    /// One encode of the quality search.
    EncodeAttempt {
        attempt: u32,
        quality: f32,
        size_bytes: u64,
        target_bytes: u64,
    },
    /// The quality search accepted an attempt.
    Accepted {
        quality: f32,
        size_bytes: u64,
        attempts: u32,
        within_target: bool,
    },
}

/// Receives [`PipelineEvent`]s.
pub trait PipelineObserver {
    fn on_event(&self, event: &PipelineEvent);
}

impl<F> PipelineObserver for F
where
    F: Fn(&PipelineEvent),
{
    fn on_event(&self, event: &PipelineEvent) {
        self(event)
    }
}

/// Emits every event through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_event(&self, event: &PipelineEvent) {
        match *event {
            PipelineEvent::ShortCircuit {
                size_bytes,
                target_bytes,
            } => info!(size_bytes, target_bytes, "image within budget, skipping compression"),
            PipelineEvent::Decoded { width, height } => debug!(width, height, "decoded image"),
            PipelineEvent::Scaled { from, to } => debug!(
                from_width = from.0,
                from_height = from.1,
                to_width = to.0,
                to_height = to.1,
                "scaled image"
            ),
            PipelineEvent::EncodeAttempt {
                attempt,
                quality,
                size_bytes,
                target_bytes,
            } => debug!(attempt, quality, size_bytes, target_bytes, "encode attempt"),
            PipelineEvent::Accepted {
                quality,
                size_bytes,
                attempts,
                within_target,
            } => info!(quality, size_bytes, attempts, within_target, "compression finished"),
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {
    fn on_event(&self, _event: &PipelineEvent) {}
}
