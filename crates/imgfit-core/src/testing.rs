//! Deterministic test doubles for the pipeline.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use crate::codec::ImageCodec;
use crate::decode::{DecodeError, DecodedImage};
use crate::encode::EncodeError;
use crate::observe::{PipelineEvent, PipelineObserver};

/// Codec whose "decoded" image has fixed dimensions and whose encoded size
/// is a synthetic function of (quality, width, height).
pub(crate) struct FakeCodec<F> {
    width: u32,
    height: u32,
    size_fn: F,
    fail_encode_at: Option<u32>,
    encodes: AtomicU32,
    qualities: Mutex<Vec<f32>>,
}

impl<F> FakeCodec<F>
where
    F: Fn(f32, u32, u32) -> usize,
{
    pub(crate) fn new(width: u32, height: u32, size_fn: F) -> Self {
        Self {
            width,
            height,
            size_fn,
            fail_encode_at: None,
            encodes: AtomicU32::new(0),
            qualities: Mutex::new(Vec::new()),
        }
    }

    /// Make the n-th encode (1-based) fail.
    pub(crate) fn failing_encode_at(mut self, attempt: u32) -> Self {
        self.fail_encode_at = Some(attempt);
        self
    }

    pub(crate) fn encode_count(&self) -> u32 {
        self.encodes.load(Ordering::SeqCst)
    }

    pub(crate) fn qualities(&self) -> Vec<f32> {
        self.qualities.lock().unwrap().clone()
    }
}

impl<F> ImageCodec for FakeCodec<F>
where
    F: Fn(f32, u32, u32) -> usize,
{
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::UnsupportedOrCorruptImage(
                "empty input".to_string(),
            ));
        }
        DecodedImage::blank(self.width, self.height)
    }

    fn scale(
        &self,
        _image: &DecodedImage,
        width: u32,
        height: u32,
    ) -> Result<DecodedImage, DecodeError> {
        DecodedImage::blank(width, height)
    }

    fn encode(&self, image: &DecodedImage, quality: f32) -> Result<Vec<u8>, EncodeError> {
        let attempt = self.encodes.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_encode_at == Some(attempt) {
            return Err(EncodeError::EncodingFailed("synthetic failure".to_string()));
        }
        self.qualities.lock().unwrap().push(quality);
        let size = (self.size_fn)(quality, image.width, image.height);
        Ok(vec![0x5A; size])
    }
}

/// Observer that keeps every event.
#[derive(Default)]
pub(crate) struct Recorder(Mutex<Vec<PipelineEvent>>);

impl Recorder {
    pub(crate) fn events(&self) -> Vec<PipelineEvent> {
        self.0.lock().unwrap().clone()
    }
}

impl PipelineObserver for Recorder {
    fn on_event(&self, event: &PipelineEvent) {
        self.0.lock().unwrap().push(event.clone());
    }
}

/// Size function linear in quality: `bytes_at_full * quality`, exact for
/// the tenths the search uses.
pub(crate) fn linear_size(bytes_at_full: usize) -> impl Fn(f32, u32, u32) -> usize {
    move |quality, _, _| bytes_at_full * (quality * 10.0).round() as usize / 10
}
