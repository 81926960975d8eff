//! Sample format conversion
//!
//! Translates between the capture/playback format (16-bit signed PCM) and
//! the internal normalized float format. This is the only place where the
//! two representations meet; the processing stages see nothing but
//! normalized samples.
//!
//! Policy: converting float to PCM clamps to the representable range before
//! truncating. Gain and the feedback tap can push samples past full scale,
//! and the boundary absorbs that silently rather than surfacing errors on
//! the real-time path.

// ============================================================================
// Constants
// ============================================================================

/// Full-scale magnitude of 16-bit PCM (divisor/multiplier at the boundary)
pub const PCM_SCALE: f32 = 32768.0;

/// Lowest representable 16-bit sample, as float
pub const PCM_MIN: f32 = -32768.0;

/// Highest representable 16-bit sample, as float
pub const PCM_MAX: f32 = 32767.0;

// ============================================================================
// Single-sample helpers
// ============================================================================

/// Convert one 16-bit PCM sample to a normalized float in [-1.0, 1.0)
///
/// No clamping is needed in this direction: the integer format already
/// bounds the input range.
#[inline]
pub fn sample_to_float(raw: i16) -> f32 {
    raw as f32 / PCM_SCALE
}

/// Convert one normalized float sample back to 16-bit PCM
///
/// Values outside the normalized range are clamped to [-32768, 32767]
/// before truncating toward zero, so full-scale input (exactly 1.0) lands
/// on 32767 instead of wrapping.
#[inline]
pub fn sample_to_pcm(normalized: f32) -> i16 {
    (normalized * PCM_SCALE).clamp(PCM_MIN, PCM_MAX) as i16
}

// ============================================================================
// Frame-level conversion
// ============================================================================

/// Convert a PCM frame into an equally sized normalized frame
///
/// Both slices must have the same length; the processor sizes its scratch
/// frame at session start so no allocation happens here.
pub fn pcm_to_float(pcm: &[i16], normalized: &mut [f32]) {
    debug_assert_eq!(pcm.len(), normalized.len());
    for (out, &raw) in normalized.iter_mut().zip(pcm) {
        *out = sample_to_float(raw);
    }
}

/// Convert a normalized frame back into an equally sized PCM frame
///
/// Applies the clamp-then-truncate policy of [`sample_to_pcm`] per sample.
pub fn float_to_pcm(normalized: &[f32], pcm: &mut [i16]) {
    debug_assert_eq!(normalized.len(), pcm.len());
    for (out, &sample) in pcm.iter_mut().zip(normalized) {
        *out = sample_to_pcm(sample);
    }
}

// ============================================================================
// Tests
// ============================================================================
