//! Host-fed capture provider.
//!
//! For engines whose audio I/O callback already hands over microphone
//! samples: the host keeps the `ManualFeed` and pushes whatever it receives,
//! the session owns the `ManualProvider`.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::audio_models::{AudioSource, StreamFormat};
use crate::models::error::CaptureError;
use crate::traits::capture_provider::{AudioBufferCallback, CaptureProvider};

#[derive(Default)]
struct FeedState {
    callback: Option<AudioBufferCallback>,
    format: Option<StreamFormat>,
}

/// Provider side of a manual feed.
pub struct ManualProvider {
    source: AudioSource,
    available: bool,
    shared: Arc<Mutex<FeedState>>,
}

/// Host side of a manual feed. Cheap to clone.
#[derive(Clone)]
pub struct ManualFeed {
    shared: Arc<Mutex<FeedState>>,
}

impl ManualProvider {
    /// Create a connected provider/feed pair for the default input.
    pub fn new() -> (Self, ManualFeed) {
        Self::with_source(AudioSource::default_input())
    }

    pub fn with_source(source: AudioSource) -> (Self, ManualFeed) {
        let shared = Arc::new(Mutex::new(FeedState::default()));
        let provider = Self {
            source,
            available: true,
            shared: Arc::clone(&shared),
        };
        (provider, ManualFeed { shared })
    }

    /// A provider that reports no device, as on a machine without a microphone.
    pub fn unavailable() -> Self {
        let (mut provider, _) = Self::new();
        provider.available = false;
        provider
    }
}

impl CaptureProvider for ManualProvider {
    fn is_available(&self) -> bool {
        self.available
    }

    fn device_info(&self) -> AudioSource {
        self.source.clone()
    }

    fn start(&mut self, format: StreamFormat, callback: AudioBufferCallback) -> Result<(), CaptureError> {
        if !self.available {
            return Err(CaptureError::NoDeviceAvailable);
        }
        let mut state = self.shared.lock();
        if state.callback.is_some() {
            return Err(CaptureError::AlreadyRecording);
        }
        state.callback = Some(callback);
        state.format = Some(format);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), CaptureError> {
        let mut state = self.shared.lock();
        state.callback = None;
        state.format = None;
        Ok(())
    }
}

impl ManualFeed {
    /// Deliver interleaved samples. Returns `false` (and drops them) when
    /// the provider is not running.
    ///
    /// Deliveries are serialized, so the session's buffer sees one writer
    /// even when several threads push.
    pub fn push(&self, samples: &[f32]) -> bool {
        let state = self.shared.lock();
        match state.callback {
            Some(ref callback) => {
                callback(samples);
                true
            }
            None => false,
        }
    }

    /// Push `secs` seconds of a constant `value` in the running format.
    ///
    /// Returns the number of samples delivered (0 when not running).
    pub fn push_constant(&self, value: f32, secs: f64) -> usize {
        let Some(format) = self.format() else {
            return 0;
        };
        let frames = (secs * format.sample_rate as f64).round() as usize;
        let samples = vec![value; frames * format.channels as usize];
        if self.push(&samples) {
            samples.len()
        } else {
            0
        }
    }

    /// Format requested by the session, while running.
    pub fn format(&self) -> Option<StreamFormat> {
        self.shared.lock().format
    }

    pub fn is_running(&self) -> bool {
        self.shared.lock().callback.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_callback() -> (AudioBufferCallback, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let callback: AudioBufferCallback = Arc::new(move |samples: &[f32]| {
            seen.fetch_add(samples.len(), Ordering::SeqCst);
        });
        (callback, count)
    }

    const MONO_8K: StreamFormat = StreamFormat {
        sample_rate: 8000,
        channels: 1,
    };

    #[test]
    fn push_before_start_is_dropped() {
        let (_provider, feed) = ManualProvider::new();
        assert!(!feed.push(&[0.1, 0.2]));
        assert!(!feed.is_running());
    }

    #[test]
    fn push_reaches_callback_while_running() {
        let (mut provider, feed) = ManualProvider::new();
        let (callback, count) = counting_callback();

        provider.start(MONO_8K, callback).unwrap();
        assert!(feed.push(&[0.1, 0.2, 0.3]));
        assert_eq!(feed.push_constant(0.0, 0.5), 4000);
        assert_eq!(count.load(Ordering::SeqCst), 4003);

        provider.stop().unwrap();
        assert!(!feed.push(&[0.4]));
        assert_eq!(count.load(Ordering::SeqCst), 4003);
    }

    #[test]
    fn double_start_is_rejected() {
        let (mut provider, _feed) = ManualProvider::new();
        let (callback, _) = counting_callback();
        provider.start(MONO_8K, Arc::clone(&callback)).unwrap();

        let err = provider.start(MONO_8K, callback).unwrap_err();
        assert!(matches!(err, CaptureError::AlreadyRecording));
    }

    #[test]
    fn unavailable_provider_refuses_to_start() {
        let mut provider = ManualProvider::unavailable();
        let (callback, _) = counting_callback();
        assert!(!provider.is_available());
        assert!(matches!(
            provider.start(MONO_8K, callback),
            Err(CaptureError::NoDeviceAvailable)
        ));
    }
}
