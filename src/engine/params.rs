//! Shared monitoring parameters
//!
//! Volume and reverb level are the only state shared between the control
//! surface and the frame pipeline. Each is stored as the bit pattern of an
//! `f32` inside an [`AtomicU32`], so a reader always sees a whole value
//! from before or after a write, never a torn one. The two fields are
//! independent; nothing in the pipeline needs them to change together, so
//! per-field atomicity is the whole concurrency contract and no lock is
//! involved.

use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Volume applied when nothing has been configured (unity passthrough)
pub const DEFAULT_VOLUME: f32 = 1.0;

/// Reverb level applied when nothing has been configured
pub const DEFAULT_REVERB_LEVEL: f32 = 0.5;

/// Lower bound of both parameters
const PARAM_MIN: f32 = 0.0;

/// Upper bound of both parameters
const PARAM_MAX: f32 = 1.0;

// ============================================================================
// MonitorParams
// ============================================================================

/// Lock-free store for the two runtime parameters
///
/// Setters clamp to [0.0, 1.0] before storing; out-of-range input is a
/// normal occurrence from a control surface, not an error. All access uses
/// relaxed ordering since each field stands alone and no cross-field or
/// cross-state ordering is required.
#[derive(Debug)]
pub struct MonitorParams {
    volume: AtomicU32,
    reverb_level: AtomicU32,
}

impl MonitorParams {
    /// Create a store holding the default volume and reverb level
    pub fn new() -> Self {
        Self {
            volume: AtomicU32::new(DEFAULT_VOLUME.to_bits()),
            reverb_level: AtomicU32::new(DEFAULT_REVERB_LEVEL.to_bits()),
        }
    }

    /// Set the volume, clamping to [0.0, 1.0]
    pub fn set_volume(&self, volume: f32) {
        let clamped = volume.clamp(PARAM_MIN, PARAM_MAX);
        self.volume.store(clamped.to_bits(), Ordering::Relaxed);
    }

    /// Set the reverb level, clamping to [0.0, 1.0]
    pub fn set_reverb_level(&self, level: f32) {
        let clamped = level.clamp(PARAM_MIN, PARAM_MAX);
        self.reverb_level.store(clamped.to_bits(), Ordering::Relaxed);
    }

    /// Current volume
    pub fn volume(&self) -> f32 {
        f32::from_bits(self.volume.load(Ordering::Relaxed))
    }

    /// Current reverb level
    pub fn reverb_level(&self) -> f32 {
        f32::from_bits(self.reverb_level.load(Ordering::Relaxed))
    }

    /// Read both parameters for one frame's worth of processing
    ///
    /// The two loads are not a joint transaction; a concurrent update may
    /// land between them, which is acceptable since the fields never need
    /// to agree with each other.
    pub fn snapshot(&self) -> ParamsSnapshot {
        ParamsSnapshot {
            volume: self.volume(),
            reverb_level: self.reverb_level(),
        }
    }

    /// Store both fields from a snapshot, clamping each
    pub fn apply(&self, snapshot: ParamsSnapshot) {
        self.set_volume(snapshot.volume);
        self.set_reverb_level(snapshot.reverb_level);
    }
}

impl Default for MonitorParams {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// ParamsSnapshot
// ============================================================================

/// Plain copy of the parameters at one point in time
///
/// This is what the frame pipeline works from (read once per frame) and
/// what settings files serialize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamsSnapshot {
    /// Gain multiplier in [0.0, 1.0]
    pub volume: f32,
    /// Reverb level in [0.0, 1.0]
    pub reverb_level: f32,
}

impl Default for ParamsSnapshot {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            reverb_level: DEFAULT_REVERB_LEVEL,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
