//! Sidetone - Voice Monitoring DSP
//!
//! Sidetone transforms a stream of fixed-size 16-bit PCM frames, as
//! delivered by a microphone capture callback, into monitor-ready output
//! frames of the same length: a gain stage followed by a one-sample
//! feedback delay ("reverb"), with both parameters adjustable from a
//! control thread while frames flow.
//!
//! # Architecture
//!
//! - `dsp`: the processing stages (PCM conversion, gain, feedback delay)
//! - `engine`: parameter store, session lifecycle, and the frame processor
//! - `cli`: offline WAV tooling wrapped around the same pipeline
//!
//! The frame pipeline is lock-free and allocation-free once a session is
//! running; the single sample of cross-frame delay state is owned by the
//! processor and never shared.

pub mod cli;
pub mod dsp;
pub mod engine;
pub mod error;

pub use error::{Result, SidetoneError};
