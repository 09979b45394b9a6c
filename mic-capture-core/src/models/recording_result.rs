use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::sample_buffer::SampleBuffer;

/// Result returned when a clip has been written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingResult {
    pub file_path: PathBuf,
    pub duration_secs: f64,
    pub metadata: RecordingMetadata,
    pub checksum: String,
}

/// Metadata stored alongside a recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingMetadata {
    pub id: String,
    pub duration_secs: f64,
    pub file_path: String,
    pub checksum: String,
    pub created_at: String,
    pub sample_rate: u32,
    pub channels: u16,
    pub sample_count: u64,
    pub device_name: Option<String>,
}

impl RecordingMetadata {
    pub fn for_clip(
        buffer: &SampleBuffer,
        file_path: &str,
        checksum: &str,
        device_name: Option<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            duration_secs: buffer.duration().as_secs_f64(),
            file_path: file_path.to_string(),
            checksum: checksum.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            sample_rate: buffer.sample_rate(),
            channels: buffer.channels(),
            sample_count: buffer.len() as u64,
            device_name,
        }
    }
}
