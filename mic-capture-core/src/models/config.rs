use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::processing::wav_format::Pcm16Format;

/// Configuration for a capture session and where its clips are saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfiguration {
    /// Sample rate used by `start_default` (default: 44100).
    pub sample_rate: u32,

    /// Interleaved channel count requested from the provider (default: 1).
    pub channels: u16,

    /// Clip length used by `start_default`, in seconds (default: 10).
    pub max_duration_secs: f64,

    /// Directory where recordings are written. Created on first save.
    pub output_directory: PathBuf,

    /// File stem for saved clips; collisions get `_1`, `_2`, ... suffixes.
    pub base_name: String,

    /// Upper bound on numeric suffixes tried before giving up.
    pub max_name_attempts: u32,

    /// Write a `<name>.metadata.json` sidecar next to each recording.
    pub write_metadata: bool,
}

impl CaptureConfiguration {
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_rate == 0 {
            return Err("sample rate must be positive".into());
        }
        if self.channels == 0 {
            return Err("channel count must be at least 1".into());
        }
        Pcm16Format::checked(self.sample_rate, self.channels)?;
        if !(self.max_duration_secs > 0.0 && self.max_duration_secs.is_finite()) {
            return Err(format!(
                "max duration must be positive, got {}",
                self.max_duration_secs
            ));
        }
        if self.base_name.is_empty() {
            return Err("base name must not be empty".into());
        }
        if self.base_name.contains(['/', '\\']) {
            return Err(format!(
                "base name must not contain path separators: {}",
                self.base_name
            ));
        }
        if self.max_name_attempts == 0 {
            return Err("max name attempts must be at least 1".into());
        }
        Ok(())
    }
}

impl Default for CaptureConfiguration {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            channels: 1,
            max_duration_secs: 10.0,
            output_directory: PathBuf::from("recordings"),
            base_name: "recording".into(),
            max_name_attempts: 10_000,
            write_metadata: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(CaptureConfiguration::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let bad = [
            CaptureConfiguration { sample_rate: 0, ..Default::default() },
            CaptureConfiguration { channels: 0, ..Default::default() },
            CaptureConfiguration { channels: 4096, sample_rate: 1_000_000, ..Default::default() },
            CaptureConfiguration { channels: 40000, sample_rate: 8000, ..Default::default() },
            CaptureConfiguration { max_duration_secs: 0.0, ..Default::default() },
            CaptureConfiguration { max_duration_secs: f64::NAN, ..Default::default() },
            CaptureConfiguration { base_name: String::new(), ..Default::default() },
            CaptureConfiguration { base_name: "../escape".into(), ..Default::default() },
            CaptureConfiguration { max_name_attempts: 0, ..Default::default() },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "accepted {:?}", config);
        }
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: CaptureConfiguration =
            serde_json::from_str(r#"{ "sample_rate": 8000, "base_name": "take" }"#).unwrap();
        assert_eq!(config.sample_rate, 8000);
        assert_eq!(config.base_name, "take");
        assert_eq!(config.channels, 1);
        assert_eq!(config.max_name_attempts, 10_000);
    }
}
