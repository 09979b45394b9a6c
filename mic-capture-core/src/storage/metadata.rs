use std::fs;
use std::path::{Path, PathBuf};

use crate::models::error::CaptureError;
use crate::models::recording_result::RecordingMetadata;

/// Path of the JSON sidecar for a recording: `clip.wav` → `clip.metadata.json`.
pub fn metadata_path(recording_path: &Path) -> PathBuf {
    recording_path.with_extension("metadata.json")
}

/// Write recording metadata as a JSON sidecar file.
pub fn write_metadata(metadata: &RecordingMetadata, recording_path: &Path) -> Result<(), CaptureError> {
    let metadata_path = metadata_path(recording_path);
    let json = serde_json::to_string_pretty(metadata)
        .map_err(|e| CaptureError::Encoding(format!("failed to serialize metadata: {}", e)))?;
    fs::write(&metadata_path, json).map_err(|e| CaptureError::io(&metadata_path, e))?;
    Ok(())
}

/// Read recording metadata from a JSON sidecar file.
pub fn read_metadata(recording_path: &Path) -> Result<RecordingMetadata, CaptureError> {
    let metadata_path = metadata_path(recording_path);
    let json = fs::read_to_string(&metadata_path).map_err(|e| CaptureError::io(&metadata_path, e))?;
    let metadata: RecordingMetadata = serde_json::from_str(&json)
        .map_err(|e| CaptureError::Encoding(format!("failed to parse metadata: {}", e)))?;
    Ok(metadata)
}
