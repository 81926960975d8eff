//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::Path;

use log::info;

use crate::engine::io::{generate_test_tone, read_wav_mono, write_wav_mono};
use crate::engine::params::ParamsSnapshot;
use crate::engine::processor::MonitorProcessor;
use crate::engine::session::SessionConfig;
use crate::error::{Result, SidetoneError};

/// Run a WAV file through the monitoring pipeline.
pub fn process_file(
    input: &Path,
    output: &Path,
    volume: Option<f32>,
    reverb: Option<f32>,
    frame_size: usize,
    settings: Option<&Path>,
) -> Result<()> {
    info!(
        "Processing {} -> {} ({} samples/frame)",
        input.display(),
        output.display(),
        frame_size
    );

    let (samples, sample_rate) = read_wav_mono(input)?;

    // Settings file provides the baseline; explicit flags win over it
    let mut requested = match settings {
        Some(path) => load_settings(path)?,
        None => ParamsSnapshot::default(),
    };
    if let Some(v) = volume {
        requested.volume = v;
    }
    if let Some(r) = reverb {
        requested.reverb_level = r;
    }

    let mut processor = MonitorProcessor::new();
    processor.params().apply(requested);
    processor.start(SessionConfig::new(frame_size, sample_rate))?;

    // Report the values actually in effect after clamping
    let effective = processor.params().snapshot();
    println!("=== Sidetone Processor ===");
    println!("Input: {}", input.display());
    println!("Output: {}", output.display());
    println!("Volume: {:.2}", effective.volume);
    println!("Reverb: {:.2}", effective.reverb_level);
    println!(
        "Frames: {} samples at {} Hz",
        frame_size, sample_rate
    );

    let transformed = process_stream(&mut processor, &samples)?;
    processor.stop();

    write_wav_mono(output, &transformed, sample_rate)?;
    println!("Wrote {} samples to {}", transformed.len(), output.display());

    Ok(())
}

/// Generate a sine test tone and write it to a WAV file.
pub fn generate_tone(
    output: &Path,
    frequency: f32,
    duration: f32,
    sample_rate: u32,
    amplitude: f32,
) -> Result<()> {
    info!(
        "Generating {:.0} Hz tone: {:.1}s at {} Hz",
        frequency, duration, sample_rate
    );

    let samples = generate_test_tone(frequency, duration, sample_rate, amplitude.clamp(0.0, 1.0));
    write_wav_mono(output, &samples, sample_rate)?;

    println!(
        "Wrote {:.1}s tone ({} samples) to {}",
        duration,
        samples.len(),
        output.display()
    );

    Ok(())
}

/// Print geometry and level info for a WAV file.
pub fn show_info(input: &Path) -> Result<()> {
    let (samples, sample_rate) = read_wav_mono(input)?;

    let duration = samples.len() as f64 / sample_rate as f64;
    let peak = samples.iter().map(|&s| (s as i32).abs()).max().unwrap_or(0);

    println!("File: {}", input.display());
    println!("Samples: {}", samples.len());
    println!("Sample rate: {} Hz", sample_rate);
    println!("Duration: {:.3}s", duration);
    println!(
        "Peak: {} ({:.1}% of full scale)",
        peak,
        peak as f64 / 32768.0 * 100.0
    );

    Ok(())
}

/// Feed a whole recording through a running processor frame by frame
///
/// The recording rarely divides evenly into frames, so the final short
/// chunk is zero-padded up to the frame size and the padding is trimmed
/// from the result; output length always equals input length. The frame
/// buffers are reused across the loop.
pub fn process_stream(processor: &mut MonitorProcessor, samples: &[i16]) -> Result<Vec<i16>> {
    let frame_size = match processor.config() {
        Some(config) => config.frame_size,
        None => return Err(SidetoneError::SessionNotRunning),
    };

    let mut output = Vec::with_capacity(samples.len() + frame_size);
    let mut padded = vec![0_i16; frame_size];
    let mut frame_out = vec![0_i16; frame_size];

    for chunk in samples.chunks(frame_size) {
        let frame: &[i16] = if chunk.len() == frame_size {
            chunk
        } else {
            padded[..chunk.len()].copy_from_slice(chunk);
            padded[chunk.len()..].fill(0);
            &padded
        };
        processor.process_frame_into(frame, &mut frame_out)?;
        output.extend_from_slice(&frame_out);
    }

    output.truncate(samples.len());
    Ok(output)
}

/// Load saved volume/reverb values from a JSON settings file.
pub fn load_settings(path: &Path) -> Result<ParamsSnapshot> {
    if !path.exists() {
        return Err(SidetoneError::FileNotFound {
            path: path.display().to_string(),
            source: None,
        });
    }
    let text = std::fs::read_to_string(path)?;
    let snapshot: ParamsSnapshot = serde_json::from_str(&text)?;
    Ok(snapshot)
}

// ============================================================================
// Tests
// ============================================================================
