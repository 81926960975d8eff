//! WAV file I/O for offline processing
//!
//! The live pipeline never touches files; these helpers exist for the CLI,
//! which replays recorded audio through the processor and writes the
//! result. Only mono 16-bit integer WAV is accepted since that is the
//! capture format the pipeline speaks natively; anything else is rejected
//! rather than converted.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::dsp::sample_to_pcm;
use crate::error::{Result, SidetoneError};

/// Read a mono 16-bit WAV file
///
/// # Arguments
/// * `path` - Path to the WAV file
///
/// # Returns
/// * `Ok((samples, sample_rate))` - The raw PCM samples and their rate
/// * `Err(SidetoneError)` - If the file is missing, unreadable, or not
///   mono 16-bit integer
pub fn read_wav_mono(path: &Path) -> Result<(Vec<i16>, u32)> {
    if !path.exists() {
        return Err(SidetoneError::FileNotFound {
            path: path.display().to_string(),
            source: None,
        });
    }

    let mut reader = WavReader::open(path).map_err(|e| SidetoneError::InvalidAudio {
        reason: format!("Failed to open WAV file: {}", e),
        source: Some(Box::new(e)),
    })?;

    let spec = reader.spec();
    if spec.channels != 1 {
        return Err(SidetoneError::UnsupportedFormat {
            format: format!("{}-channel audio (only mono supported)", spec.channels),
        });
    }
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(SidetoneError::UnsupportedFormat {
            format: format!(
                "{}-bit {} audio (only 16-bit integer supported)",
                spec.bits_per_sample,
                match spec.sample_format {
                    SampleFormat::Float => "float",
                    SampleFormat::Int => "integer",
                }
            ),
        });
    }

    let samples = reader
        .samples::<i16>()
        .collect::<std::result::Result<Vec<i16>, _>>()
        .map_err(|e| SidetoneError::InvalidAudio {
            reason: format!("Failed to read samples: {}", e),
            source: Some(Box::new(e)),
        })?;

    Ok((samples, spec.sample_rate))
}

/// Write samples as a mono 16-bit WAV file
pub fn write_wav_mono(path: &Path, samples: &[i16], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec).map_err(wav_io_error)?;
    for &sample in samples {
        writer.write_sample(sample).map_err(wav_io_error)?;
    }
    writer.finalize().map_err(wav_io_error)?;

    Ok(())
}

/// Generate a test tone (sine wave) as 16-bit PCM
///
/// Useful for exercising the pipeline without a recorded input.
///
/// # Arguments
/// * `frequency` - Frequency of the sine wave in Hz
/// * `duration_secs` - Duration of the tone in seconds
/// * `sample_rate` - Sample rate in Hz
/// * `amplitude` - Peak amplitude in [0.0, 1.0]
pub fn generate_test_tone(
    frequency: f32,
    duration_secs: f32,
    sample_rate: u32,
    amplitude: f32,
) -> Vec<i16> {
    let num_samples = (duration_secs * sample_rate as f32) as usize;
    let angular_freq = 2.0 * std::f32::consts::PI * frequency / sample_rate as f32;

    (0..num_samples)
        .map(|i| sample_to_pcm((angular_freq * i as f32).sin() * amplitude))
        .collect()
}

/// Wrap a hound error as an I/O failure
fn wav_io_error(e: hound::Error) -> SidetoneError {
    SidetoneError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        e.to_string(),
    ))
}

// ============================================================================
// Tests
// ============================================================================
