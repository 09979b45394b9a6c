use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while recording or saving a clip.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no capture device available")]
    NoDeviceAvailable,

    #[error("capture already running")]
    AlreadyRecording,

    #[error("not recording")]
    NotRecording,

    #[error("too many existing files named {base_name}: gave up after {attempts} attempts")]
    TooManyExistingFiles { base_name: String, attempts: u32 },

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),

    #[error("encoding failed: {0}")]
    Encoding(String),

    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CaptureError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
