use std::sync::Arc;
use std::time::Duration;

/// A finalized clip: interleaved f32 samples plus their format.
///
/// Storage is shared and immutable, so cloning hands out the same samples
/// rather than copying them.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    samples: Arc<[f32]>,
    sample_rate: u32,
    channels: u16,
}

impl SampleBuffer {
    /// Panics if `sample_rate` or `channels` is zero.
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> Self {
        assert!(sample_rate > 0, "sample rate must be positive");
        assert!(channels > 0, "channel count must be at least 1");
        Self {
            samples: samples.into(),
            sample_rate,
            channels,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Total number of samples across all channels.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of sample frames (one sample per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }

    /// Whether both handles point at the same underlying samples.
    pub fn shares_storage_with(&self, other: &SampleBuffer) -> bool {
        Arc::ptr_eq(&self.samples, &other.samples)
    }
}
