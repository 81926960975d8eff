//! Monitoring engine
//!
//! Everything above the raw DSP stages:
//! - Shared parameter store for the control surface
//! - Session lifecycle and configuration
//! - The frame processor tying the stages together
//! - WAV I/O for offline runs

pub mod io;
pub mod params;
pub mod processor;
pub mod session;

pub use io::{generate_test_tone, read_wav_mono, write_wav_mono};
pub use params::{MonitorParams, ParamsSnapshot, DEFAULT_REVERB_LEVEL, DEFAULT_VOLUME};
pub use processor::MonitorProcessor;
pub use session::{SessionConfig, SessionState, DEFAULT_FRAME_SIZE, DEFAULT_SAMPLE_RATE};
