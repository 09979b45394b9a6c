use std::sync::Arc;

use crate::models::audio_models::{AudioSource, StreamFormat};
use crate::models::error::CaptureError;

/// Callback invoked when captured samples are available.
///
/// `samples` are interleaved f32 in the `StreamFormat` the provider was
/// started with. The session's callback appends without locking, but it
/// assumes a single caller at a time.
pub type AudioBufferCallback = Arc<dyn Fn(&[f32]) + Send + Sync + 'static>;

/// Interface for the device-side capture source a session records from.
///
/// Push-driven sources invoke the callback from their own I/O thread.
/// Poll-driven sources deliver pending samples when `poll` is called,
/// once per host tick via `CaptureSession::tick`.
pub trait CaptureProvider: Send {
    /// Whether a capture device is present.
    fn is_available(&self) -> bool;

    /// Information about the device backing this provider.
    fn device_info(&self) -> AudioSource;

    /// Begin delivering samples in `format` to `callback`.
    fn start(&mut self, format: StreamFormat, callback: AudioBufferCallback) -> Result<(), CaptureError>;

    /// Stop delivering samples and release the callback.
    fn stop(&mut self) -> Result<(), CaptureError>;

    /// Deliver any pending samples. Push-driven sources leave this as a no-op.
    fn poll(&mut self) -> Result<(), CaptureError> {
        Ok(())
    }
}
