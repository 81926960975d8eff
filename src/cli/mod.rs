//! CLI Module
//!
//! Command-line interface for running the monitoring pipeline over WAV
//! files. The live capture path has no CLI; this exists for listening to
//! the effect offline and for smoke-testing parameter settings.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::engine::session::{DEFAULT_FRAME_SIZE, DEFAULT_SAMPLE_RATE};

/// Sidetone - gain and feedback-delay monitoring over audio frames
#[derive(Parser, Debug)]
#[command(name = "sidetone")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a mono 16-bit WAV through the monitoring pipeline
    #[command(name = "process")]
    Process {
        /// Input WAV file
        input: PathBuf,

        /// Output WAV file
        #[arg(short, long)]
        output: PathBuf,

        /// Volume in [0, 1], overriding any settings file
        #[arg(long)]
        volume: Option<f32>,

        /// Reverb level in [0, 1], overriding any settings file
        #[arg(long)]
        reverb: Option<f32>,

        /// Samples per frame
        #[arg(long, default_value_t = DEFAULT_FRAME_SIZE)]
        frame_size: usize,

        /// JSON settings file with saved volume/reverb values
        #[arg(short, long)]
        settings: Option<PathBuf>,
    },

    /// Generate a sine test tone as a mono 16-bit WAV
    #[command(name = "tone")]
    Tone {
        /// Output WAV file
        output: PathBuf,

        /// Tone frequency in Hz
        #[arg(short, long, default_value_t = 440.0)]
        frequency: f32,

        /// Duration in seconds
        #[arg(short, long, default_value_t = 2.0)]
        duration: f32,

        /// Sample rate in Hz
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,

        /// Peak amplitude in [0, 1]
        #[arg(short, long, default_value_t = 0.8)]
        amplitude: f32,
    },

    /// Print geometry and level info for a mono 16-bit WAV
    #[command(name = "info")]
    Info {
        /// WAV file to inspect
        input: PathBuf,
    },
}
