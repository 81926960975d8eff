//! Gain stage
//!
//! Scales every sample of a frame by the session volume. The stage is
//! stateless and deliberately does not clamp: headroom is resolved once at
//! the PCM boundary (see [`crate::dsp::convert`]), and the feedback delay
//! downstream taps the scaled signal, so flattening peaks here would color
//! what the tap hears.

/// Multiplier above which the stage actually does work
///
/// At exactly unity the frame passes through untouched, which keeps the
/// default configuration bit-transparent.
const UNITY: f32 = 1.0;

/// Scale a frame in place by `volume`
///
/// `volume` is expected to already be clamped to [0.0, 1.0] by the
/// parameter store; the stage applies whatever it is given.
pub fn apply_gain(frame: &mut [f32], volume: f32) {
    if (volume - UNITY).abs() < f32::EPSILON {
        return;
    }
    for sample in frame.iter_mut() {
        *sample *= volume;
    }
}

// ============================================================================
// Tests
// ============================================================================
