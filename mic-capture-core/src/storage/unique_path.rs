use std::path::{Path, PathBuf};

use crate::models::error::CaptureError;

/// Pick a `.wav` path in `directory` that does not exist yet.
///
/// Tries `{base_name}.wav`, then `{base_name}_1.wav`, `{base_name}_2.wav`, ...
/// up to `{base_name}_{max_attempts}.wav`.
pub fn resolve_unique_path(directory: &Path, base_name: &str, max_attempts: u32) -> Result<PathBuf, CaptureError> {
    let candidate = directory.join(format!("{}.wav", base_name));
    if !exists(&candidate)? {
        return Ok(candidate);
    }

    for suffix in 1..=max_attempts {
        let candidate = directory.join(format!("{}_{}.wav", base_name, suffix));
        if !exists(&candidate)? {
            log::debug!("{}.wav taken, using {}", base_name, candidate.display());
            return Ok(candidate);
        }
    }

    Err(CaptureError::TooManyExistingFiles {
        base_name: base_name.to_string(),
        attempts: max_attempts,
    })
}

fn exists(path: &Path) -> Result<bool, CaptureError> {
    path.try_exists().map_err(|e| CaptureError::io(path, e))
}
