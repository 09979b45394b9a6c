//! # mic-capture-core
//!
//! Microphone recording core: a single-clip capture session and byte-exact
//! WAV/PCM-16 export.
//!
//! Device access stays outside this crate. Hosts implement the
//! `CaptureProvider` trait (or feed samples through `ManualProvider`) and
//! hand it to a `CaptureSession`.
//!
//! ## Architecture
//!
//! ```text
//! mic-capture-core (this crate)
//! ├── traits/       ← CaptureProvider, AudioBufferCallback
//! ├── models/       ← CaptureError, RecordingState, SampleBuffer, CaptureConfiguration, etc.
//! ├── processing/   ← CaptureBuffer, WAV encoding
//! ├── providers/    ← ManualProvider (host-fed samples)
//! ├── session/      ← CaptureSession (idle → recording → stopped)
//! └── storage/      ← unique file names, atomic WAV writes, metadata sidecar
//! ```
//!
//! ## Usage
//! ```no_run
//! use mic_capture_core::{CaptureConfiguration, CaptureSession, ManualProvider};
//!
//! let (provider, feed) = ManualProvider::new();
//! let mut session = CaptureSession::new(provider, CaptureConfiguration::default())?;
//!
//! session.start(5.0, 44100)?;
//! feed.push(&[0.0; 441]); // from the host's audio callback
//! let clip = session.stop()?;
//!
//! let wav_bytes = mic_capture_core::encode(&clip);
//! let saved = session.save_recording()?;
//! # let _ = (wav_bytes, saved);
//! # Ok::<(), mic_capture_core::CaptureError>(())
//! ```

pub mod models;
pub mod processing;
pub mod providers;
pub mod session;
pub mod storage;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::audio_models::{AudioSource, StreamFormat};
pub use models::config::CaptureConfiguration;
pub use models::error::CaptureError;
pub use models::recording_result::{RecordingMetadata, RecordingResult};
pub use models::sample_buffer::SampleBuffer;
pub use models::state::RecordingState;
pub use processing::capture_buffer::CaptureBuffer;
pub use processing::wav_format::{encode, quantize, write_wav, Pcm16Format};
pub use providers::manual::{ManualFeed, ManualProvider};
pub use session::capture::CaptureSession;
pub use storage::unique_path::resolve_unique_path;
pub use storage::wav_writer::save_wav;
pub use traits::capture_provider::{AudioBufferCallback, CaptureProvider};
