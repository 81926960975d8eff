//! Feedback-delay stage
//!
//! A one-sample feedback tap: each output sample mixes the current input
//! with a decayed copy of the immediately preceding *input* sample. Taking
//! the prior input rather than the prior output keeps the filter a
//! single-tap FIR, so the output magnitude is bounded by
//! (1 + decay) x the input magnitude and can never run away.
//!
//! The tap reaches across frame boundaries: [`FeedbackDelay`] carries the
//! last input sample of each frame into the next one, so a stream chopped
//! into frames sounds identical to the same stream processed whole.

// ============================================================================
// Constants
// ============================================================================

/// Maps the user-facing reverb level [0, 1] onto the decay range [0, 0.5]
///
/// Capping decay at one half keeps the tap's contribution well inside the
/// headroom the PCM boundary clamp can absorb.
pub const DECAY_SCALE: f32 = 0.5;

// ============================================================================
// FeedbackDelay
// ============================================================================

/// One-tap delay with cross-frame state
///
/// The only state is the last input sample seen, initialized to silence.
/// One instance belongs to exactly one processing session; sharing it
/// between interleaved streams would corrupt the carried sample.
#[derive(Debug, Clone)]
pub struct FeedbackDelay {
    /// Last stage-input sample of the previous frame (0.0 before any frame)
    last_input: f32,
}

impl FeedbackDelay {
    /// Create a delay stage starting from silence
    pub fn new() -> Self {
        Self { last_input: 0.0 }
    }

    /// Apply the feedback tap to a frame in place
    ///
    /// `reverb_level` is expected to already be clamped to [0.0, 1.0] by
    /// the parameter store. At level 0.0 the frame passes through
    /// unchanged, but the carried sample still tracks the input so a later
    /// level change picks up with correct history.
    pub fn process(&mut self, frame: &mut [f32], reverb_level: f32) {
        let decay = reverb_level * DECAY_SCALE;
        let mut prior = self.last_input;
        for sample in frame.iter_mut() {
            let dry = *sample;
            *sample = dry + prior * decay;
            prior = dry;
        }
        self.last_input = prior;
    }

    /// Forget the carried sample, returning the stage to silence
    ///
    /// Called at session start so no audio leaks between sessions.
    pub fn reset(&mut self) {
        self.last_input = 0.0;
    }
}

impl Default for FeedbackDelay {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_impulse_response() {
        // Impulse into a fresh stage at full reverb: the tap echoes the
        // impulse one sample later at half amplitude, then dies out.
        let mut delay = FeedbackDelay::new();
        let mut frame = [1.0_f32, 0.0, 0.0, 0.0];
        delay.process(&mut frame, 1.0);

        assert_relative_eq!(frame[0], 1.0);
        assert_relative_eq!(frame[1], 0.5);
        assert_relative_eq!(frame[2], 0.0);
        assert_relative_eq!(frame[3], 0.0);
    }

    #[test]
    fn test_tap_reads_input_not_output() {
        // With a constant input the tap must add decay x the prior *input*,
        // not accumulate its own output recursively.
        let mut delay = FeedbackDelay::new();
        let mut frame = [1.0_f32, 1.0, 1.0];
        delay.process(&mut frame, 1.0);

        assert_relative_eq!(frame[0], 1.0); // prior is silence
        assert_relative_eq!(frame[1], 1.5);
        assert_relative_eq!(frame[2], 1.5); // stays bounded at 1 + decay
    }

    #[test]
    fn test_carries_across_frame_boundary() {
        let mut delay = FeedbackDelay::new();
        let mut first = [0.0_f32, 0.0, 0.0, 0.8];
        delay.process(&mut first, 1.0);

        // First sample of the next frame hears the previous frame's tail
        let mut second = [0.0_f32, 0.0, 0.0, 0.0];
        delay.process(&mut second, 1.0);
        assert_relative_eq!(second[0], 0.4);
        assert_relative_eq!(second[1], 0.0);
    }

    #[test]
    fn test_zero_level_is_identity() {
        let mut delay = FeedbackDelay::new();
        let original = [0.5_f32, -0.25, 0.75, -1.0];
        let mut frame = original;
        delay.process(&mut frame, 0.0);
        assert_eq!(frame, original);
    }

    #[test]
    fn test_zero_level_still_tracks_state() {
        // Run one frame at level 0, then raise the level: the tap must
        // remember the real prior sample, not silence.
        let mut delay = FeedbackDelay::new();
        let mut first = [0.0_f32, 0.6];
        delay.process(&mut first, 0.0);

        let mut second = [0.0_f32, 0.0];
        delay.process(&mut second, 1.0);
        assert_relative_eq!(second[0], 0.3);
    }

    #[test]
    fn test_reset_clears_carried_sample() {
        let mut delay = FeedbackDelay::new();
        let mut frame = [0.0_f32, 0.0, 1.0];
        delay.process(&mut frame, 1.0);

        delay.reset();

        let mut next = [0.0_f32, 0.0];
        delay.process(&mut next, 1.0);
        assert_relative_eq!(next[0], 0.0);
    }

    #[test]
    fn test_split_matches_contiguous() {
        // Processing a stream whole or split into frames must produce the
        // same samples.
        let stream = [0.1_f32, -0.2, 0.3, -0.4, 0.5, -0.6];

        let mut whole = stream;
        let mut delay_whole = FeedbackDelay::new();
        delay_whole.process(&mut whole, 0.7);

        let mut split = stream;
        let mut delay_split = FeedbackDelay::new();
        let (head, tail) = split.split_at_mut(2);
        delay_split.process(head, 0.7);
        delay_split.process(tail, 0.7);

        for (a, b) in whole.iter().zip(split.iter()) {
            assert_relative_eq!(*a, *b);
        }
    }

    #[test]
    fn test_empty_frame_preserves_state() {
        let mut delay = FeedbackDelay::new();
        let mut frame = [0.0_f32, 0.9];
        delay.process(&mut frame, 1.0);

        let mut empty: [f32; 0] = [];
        delay.process(&mut empty, 1.0);

        let mut next = [0.0_f32];
        delay.process(&mut next, 1.0);
        assert_relative_eq!(next[0], 0.45);
    }
}
