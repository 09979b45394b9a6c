use std::fmt;

/// Recording session state machine.
///
/// State transitions:
/// ```text
/// idle ──start──→ recording ──stop──→ stopped
///                  ↑     │                │
///                  └─────┴─────start──────┘
/// idle / recording / stopped ──clear──→ idle
/// ```
///
/// Starting while already recording stops the in-flight recording first,
/// so `recording → recording` is a restart, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordingState {
    #[default]
    Idle,
    Recording,
    Stopped,
}

impl RecordingState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_recording(&self) -> bool {
        matches!(self, Self::Recording)
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for RecordingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
