use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::models::audio_models::{AudioSource, StreamFormat};
use crate::models::config::CaptureConfiguration;
use crate::models::error::CaptureError;
use crate::models::recording_result::{RecordingMetadata, RecordingResult};
use crate::models::sample_buffer::SampleBuffer;
use crate::models::state::RecordingState;
use crate::processing::capture_buffer::CaptureBuffer;
use crate::processing::wav_format::{Pcm16Format, MAX_PCM16_SAMPLES};
use crate::storage::{metadata, wav_writer};
use crate::traits::capture_provider::{AudioBufferCallback, CaptureProvider};

/// Buffer and format of the recording in progress.
struct ActiveRecording {
    buffer: Arc<CaptureBuffer>,
    format: StreamFormat,
}

/// Single-clip microphone recorder.
///
/// Drives an injected `CaptureProvider` through one recording at a time and
/// keeps the last finished clip in memory until it is cleared or replaced:
///
/// ```text
/// [CaptureProvider] → callback → [CaptureBuffer] --stop--> [SampleBuffer] → save_recording → .wav
/// ```
///
/// State transitions (`start`/`stop`/`clear`) take `&mut self`; hosts that
/// share a session between threads wrap it in a `parking_lot::Mutex`. The
/// capture path itself never takes a lock.
pub struct CaptureSession<P: CaptureProvider> {
    provider: P,
    config: CaptureConfiguration,
    state: RecordingState,
    active: Option<ActiveRecording>,
    last_clip: Option<SampleBuffer>,
}

impl<P: CaptureProvider> CaptureSession<P> {
    pub fn new(provider: P, config: CaptureConfiguration) -> Result<Self, CaptureError> {
        config.validate().map_err(CaptureError::ConfigurationFailed)?;
        Ok(Self {
            provider,
            config,
            state: RecordingState::Idle,
            active: None,
            last_clip: None,
        })
    }

    pub fn state(&self) -> RecordingState {
        self.state
    }

    pub fn config(&self) -> &CaptureConfiguration {
        &self.config
    }

    pub fn device_info(&self) -> AudioSource {
        self.provider.device_info()
    }

    /// The finished clip held while stopped.
    pub fn last_recording(&self) -> Option<&SampleBuffer> {
        self.last_clip.as_ref()
    }

    /// Start recording with the configured duration and sample rate.
    pub fn start_default(&mut self) -> Result<(), CaptureError> {
        self.start(self.config.max_duration_secs, self.config.sample_rate)
    }

    /// Start a new recording with room for `max_duration_secs` of audio.
    ///
    /// Starting while a recording is in progress stops it first; its clip
    /// becomes the last recording and a fresh one begins. Stopping at the
    /// duration limit is up to the provider; samples past the allocated
    /// capacity are dropped.
    pub fn start(&mut self, max_duration_secs: f64, sample_rate: u32) -> Result<(), CaptureError> {
        if sample_rate == 0 {
            return Err(CaptureError::ConfigurationFailed("sample rate must be positive".into()));
        }
        if !(max_duration_secs > 0.0 && max_duration_secs.is_finite()) {
            return Err(CaptureError::ConfigurationFailed(format!(
                "max duration must be positive, got {}",
                max_duration_secs
            )));
        }
        let format = StreamFormat {
            sample_rate,
            channels: self.config.channels,
        };
        Pcm16Format::checked(format.sample_rate, format.channels).map_err(CaptureError::ConfigurationFailed)?;
        let capacity = buffer_capacity(max_duration_secs, format)?;

        if !self.provider.is_available() {
            return Err(CaptureError::NoDeviceAvailable);
        }

        if self.state.is_recording() {
            log::info!("Start requested while recording, stopping the current recording first");
            self.finish_recording();
        }

        log::debug!(
            "Allocating capture buffer for {} samples ({}s at {} Hz, {} ch)",
            capacity,
            max_duration_secs,
            sample_rate,
            format.channels
        );
        let buffer = Arc::new(CaptureBuffer::with_capacity(capacity));
        let sink = Arc::clone(&buffer);
        let callback: AudioBufferCallback = Arc::new(move |samples: &[f32]| {
            sink.append(samples);
        });

        self.provider.start(format, callback)?;

        self.active = Some(ActiveRecording { buffer, format });
        self.state = RecordingState::Recording;
        log::info!(
            "Recording started on {} ({} Hz, {} ch, max {}s)",
            self.provider.device_info().name,
            sample_rate,
            format.channels,
            max_duration_secs
        );
        Ok(())
    }

    /// Stop recording and return the captured clip.
    ///
    /// The clip holds exactly the samples captured since `start`. Calling
    /// `stop` again while stopped returns the same clip.
    pub fn stop(&mut self) -> Result<SampleBuffer, CaptureError> {
        match self.state {
            RecordingState::Idle => Err(CaptureError::NotRecording),
            RecordingState::Stopped => self.last_clip.clone().ok_or(CaptureError::NotRecording),
            RecordingState::Recording => Ok(self.finish_recording()),
        }
    }

    /// Time captured so far in the current recording; zero when not recording.
    pub fn elapsed(&self) -> Duration {
        match (&self.active, self.state) {
            (Some(active), RecordingState::Recording) => {
                let frames = active.buffer.len() / active.format.channels as usize;
                Duration::from_secs_f64(frames as f64 / active.format.sample_rate as f64)
            }
            _ => Duration::ZERO,
        }
    }

    /// Samples dropped in the current recording because the buffer was full.
    pub fn overflowed_samples(&self) -> u64 {
        self.active.as_ref().map_or(0, |active| active.buffer.overflowed())
    }

    /// Stop any recording, discard the last clip and return to idle.
    pub fn clear(&mut self) {
        if self.state.is_recording() {
            self.finish_recording();
        }
        self.last_clip = None;
        self.state = RecordingState::Idle;
        log::info!("Recording cleared");
    }

    /// One host scheduling tick: lets poll-driven providers deliver samples.
    pub fn tick(&mut self) -> Result<(), CaptureError> {
        if self.state.is_recording() {
            self.provider.poll()?;
        }
        Ok(())
    }

    /// Write the last clip to the configured directory under a unique name.
    ///
    /// Only valid while stopped. The in-memory clip is kept whether or not
    /// the save succeeds.
    pub fn save_recording(&self) -> Result<RecordingResult, CaptureError> {
        let clip = match (self.state, &self.last_clip) {
            (RecordingState::Stopped, Some(clip)) => clip,
            _ => return Err(CaptureError::NotRecording),
        };

        self.write_clip(clip).inspect_err(|e| {
            log::error!("Failed to save recording: {}", e);
        })
    }

    fn write_clip(&self, clip: &SampleBuffer) -> Result<RecordingResult, CaptureError> {
        let file_path = wav_writer::save_wav(
            clip,
            &self.config.output_directory,
            &self.config.base_name,
            self.config.max_name_attempts,
        )?;

        // The .wav is already in place; a save that fails past here must not leave it behind.
        self.describe_saved_clip(clip, file_path.clone()).inspect_err(|_| {
            discard_file(&file_path);
        })
    }

    fn describe_saved_clip(&self, clip: &SampleBuffer, file_path: PathBuf) -> Result<RecordingResult, CaptureError> {
        let checksum = wav_writer::sha256_file(&file_path)?;

        let recording_metadata = RecordingMetadata::for_clip(
            clip,
            &file_path.to_string_lossy(),
            &checksum,
            Some(self.provider.device_info().name),
        );
        if self.config.write_metadata {
            metadata::write_metadata(&recording_metadata, &file_path)?;
        }

        Ok(RecordingResult {
            file_path,
            duration_secs: clip.duration().as_secs_f64(),
            metadata: recording_metadata,
            checksum,
        })
    }

    /// Halt the provider, freeze the buffer into a clip and enter `Stopped`.
    fn finish_recording(&mut self) -> SampleBuffer {
        if let Err(e) = self.provider.stop() {
            log::warn!("Capture provider failed to stop cleanly: {}", e);
        }

        let clip = match self.active.take() {
            Some(active) => {
                let dropped = active.buffer.overflowed();
                if dropped > 0 {
                    log::warn!("Recording hit its capacity, {} samples were dropped", dropped);
                }
                SampleBuffer::new(active.buffer.snapshot(), active.format.sample_rate, active.format.channels)
            }
            None => SampleBuffer::new(Vec::<f32>::new(), self.config.sample_rate, self.config.channels),
        };

        log::info!(
            "Recording stopped: {} samples ({:.2}s)",
            clip.len(),
            clip.duration().as_secs_f64()
        );
        self.last_clip = Some(clip.clone());
        self.state = RecordingState::Stopped;
        clip
    }
}

impl<P: CaptureProvider> Drop for CaptureSession<P> {
    fn drop(&mut self) {
        if self.state.is_recording() {
            if let Err(e) = self.provider.stop() {
                log::warn!("Capture provider failed to stop on drop: {}", e);
            }
        }
    }
}

/// Remove a recording that was written but could not be completed.
fn discard_file(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        log::warn!("Failed to remove incomplete recording {}: {}", path.display(), e);
    }
}

/// Interleaved sample capacity for `max_duration_secs` of audio in `format`.
fn buffer_capacity(max_duration_secs: f64, format: StreamFormat) -> Result<usize, CaptureError> {
    let frames = (max_duration_secs * format.sample_rate as f64).floor();
    let samples = frames * format.channels as f64;
    if samples > MAX_PCM16_SAMPLES as f64 {
        return Err(CaptureError::ConfigurationFailed(format!(
            "{}s at {} Hz x {} ch exceeds the WAV size limit",
            max_duration_secs, format.sample_rate, format.channels
        )));
    }
    Ok(samples as usize)
}
