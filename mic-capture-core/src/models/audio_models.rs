use serde::{Deserialize, Serialize};

/// An audio input device backing a capture provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioSource {
    pub id: String,
    pub name: String,
    pub is_default: bool,
}

impl AudioSource {
    /// The platform default input, whatever it happens to be.
    pub fn default_input() -> Self {
        Self {
            id: "default".into(),
            name: "Default Microphone".into(),
            is_default: true,
        }
    }
}

/// Sample layout a provider is asked to deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamFormat {
    pub sample_rate: u32,
    pub channels: u16,
}
