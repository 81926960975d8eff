//! Session lifecycle types
//!
//! A session is the span between `start()` and `stop()` on the processor,
//! during which the capture geometry is fixed and the delay tap is
//! continuous. The types here describe that lifecycle; the transitions
//! themselves live in [`crate::engine::processor`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SidetoneError};

// ============================================================================
// Constants
// ============================================================================

/// Frame length used when the caller does not pick one (samples per frame)
pub const DEFAULT_FRAME_SIZE: usize = 512;

/// Sample rate used when the caller does not pick one (Hz)
pub const DEFAULT_SAMPLE_RATE: u32 = 16_000;

// ============================================================================
// SessionState
// ============================================================================

/// Lifecycle states of a monitoring session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No session active; frames are rejected (initial state)
    #[default]
    Idle,
    /// Frames are being accepted and transformed
    Running,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "Idle"),
            SessionState::Running => write!(f, "Running"),
        }
    }
}

// ============================================================================
// SessionConfig
// ============================================================================

/// Fixed capture geometry for one session
///
/// Frame size and sample rate are agreed with the capture side before the
/// first frame and cannot change while the session runs; changing either
/// means stopping and starting a new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Samples per frame, shared by capture, processing, and playback
    pub frame_size: usize,
    /// Capture sample rate in Hz
    pub sample_rate: u32,
}

impl SessionConfig {
    /// Create a config with the given geometry
    pub fn new(frame_size: usize, sample_rate: u32) -> Self {
        Self {
            frame_size,
            sample_rate,
        }
    }

    /// Check the geometry is usable
    ///
    /// Both fields must be nonzero; everything else is the capture side's
    /// business.
    pub fn validate(&self) -> Result<()> {
        if self.frame_size == 0 {
            return Err(SidetoneError::InvalidConfig {
                reason: "frame size must be at least 1 sample".to_string(),
            });
        }
        if self.sample_rate == 0 {
            return Err(SidetoneError::InvalidConfig {
                reason: "sample rate must be nonzero".to_string(),
            });
        }
        Ok(())
    }

    /// Duration of one frame in seconds
    pub fn frame_duration_secs(&self) -> f64 {
        self.frame_size as f64 / self.sample_rate as f64
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_SIZE, DEFAULT_SAMPLE_RATE)
    }
}

// ============================================================================
// Tests
// ============================================================================
