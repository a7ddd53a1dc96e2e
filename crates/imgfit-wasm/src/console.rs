//! Pipeline logging to the browser console.

use imgfit_core::{PipelineEvent, PipelineObserver};
use web_sys::console;

/// Writes pipeline events to the browser console.
///
/// Encode attempts go to `console.debug`, the short-circuit and the final
/// acceptance to `console.info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleObserver;

impl PipelineObserver for ConsoleObserver {
    fn on_event(&self, event: &PipelineEvent) {
        let line = format_event(event);
        match event {
            PipelineEvent::ShortCircuit { .. } | PipelineEvent::Accepted { .. } => {
                console::info_1(&line.into())
            }
            _ => console::debug_1(&line.into()),
        }
    }
}

/// Render an event as a single `[imgfit]` console line.
pub(crate) fn format_event(event: &PipelineEvent) -> String {
    match *event {
        PipelineEvent::ShortCircuit {
            size_bytes,
            target_bytes,
        } => format!("[imgfit] {size_bytes} B within {target_bytes} B budget, unchanged"),
        PipelineEvent::Decoded { width, height } => format!("[imgfit] decoded {width}x{height}"),
        PipelineEvent::Scaled { from, to } => {
            format!("[imgfit] scaled {}x{} -> {}x{}", from.0, from.1, to.0, to.1)
        }
        PipelineEvent::EncodeAttempt {
            attempt,
            quality,
            size_bytes,
            target_bytes,
        } => format!(
            "[imgfit] attempt {attempt}: quality {quality:.1} -> {size_bytes} B (target {target_bytes} B)"
        ),
        PipelineEvent::Accepted {
            quality,
            size_bytes,
            attempts,
            within_target,
        } => {
            let note = if within_target { "" } else { ", over budget" };
            format!(
                "[imgfit] accepted quality {quality:.1} at {size_bytes} B after {attempts} attempt(s){note}"
            )
        }
    }
}
