//! Error handling
//!
//! The frame pipeline distinguishes usage errors (wrong lifecycle state,
//! wrong frame geometry) from everything else: usage errors are rejected
//! synchronously and never corrupt session state, while out-of-range
//! parameter and sample values are clamped silently and never surface
//! here at all. File errors only occur in the offline tooling.

use thiserror::Error;

/// Result type alias for sidetone operations
pub type Result<T> = std::result::Result<T, SidetoneError>;

/// Main error type for sidetone operations
#[derive(Error, Debug)]
pub enum SidetoneError {
    // Session/Usage Errors
    #[error("No session running: call start() before processing frames")]
    SessionNotRunning,

    #[error("Session already running: call stop() before starting another")]
    SessionAlreadyRunning,

    #[error("Frame size mismatch: session expects {expected} samples, frame has {actual}")]
    FrameSizeMismatch { expected: usize, actual: usize },

    #[error("Invalid session config: {reason}")]
    InvalidConfig { reason: String },

    // File Errors
    #[error("File not found: {path}")]
    FileNotFound {
        path: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Invalid audio file: {reason}")]
    InvalidAudio {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SidetoneError {
    /// Check if this error is a caller mistake rather than an environment
    /// failure
    ///
    /// Usage errors are rejected immediately and are not worth retrying;
    /// the frame that triggered one is simply dropped.
    pub fn is_usage_error(&self) -> bool {
        match self {
            SidetoneError::SessionNotRunning => true,
            SidetoneError::SessionAlreadyRunning => true,
            SidetoneError::FrameSizeMismatch { .. } => true,
            SidetoneError::InvalidConfig { .. } => true,
            _ => false,
        }
    }
}
