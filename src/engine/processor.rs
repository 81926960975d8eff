//! Frame processor
//!
//! [`MonitorProcessor`] is the public entry point for one session of
//! streaming transformation: PCM in, gain, feedback delay, PCM out. It
//! owns the cross-frame delay state outright and shares only the
//! parameter store with the control surface, so the frame pipeline never
//! takes a lock.
//!
//! Lifecycle is Idle -> Running -> Idle. Frames are only accepted while
//! Running, strictly one at a time and in arrival order; interleaving two
//! frames would corrupt the single sample the delay tap carries.

use std::sync::Arc;

use log::debug;

use crate::dsp::{apply_gain, float_to_pcm, pcm_to_float, FeedbackDelay};
use crate::engine::params::MonitorParams;
use crate::engine::session::{SessionConfig, SessionState};
use crate::error::{Result, SidetoneError};

// ============================================================================
// MonitorProcessor
// ============================================================================

/// Streaming frame transformer for one monitoring session
///
/// The control surface keeps a handle from [`params`](Self::params) (or
/// uses the delegating setters) and may update volume and reverb level at
/// any time; each frame reads the parameters once and applies them whole.
///
/// # Example
/// ```
/// use sidetone::engine::{MonitorProcessor, SessionConfig};
///
/// let mut processor = MonitorProcessor::new();
/// processor.start(SessionConfig::new(4, 16_000)).unwrap();
///
/// let output = processor.process_frame(&[1000, 0, 0, 0]).unwrap();
/// assert_eq!(output, vec![1000, 250, 0, 0]);
///
/// processor.stop();
/// ```
#[derive(Debug)]
pub struct MonitorProcessor {
    /// Parameter store shared with the control surface
    params: Arc<MonitorParams>,

    /// Current lifecycle state
    state: SessionState,

    /// Geometry of the running session (None while Idle)
    config: Option<SessionConfig>,

    /// Feedback tap, continuous across frames within a session
    delay: FeedbackDelay,

    /// Normalized working frame, sized once at session start
    scratch: Vec<f32>,
}

impl MonitorProcessor {
    /// Create an idle processor with default parameters
    pub fn new() -> Self {
        Self {
            params: Arc::new(MonitorParams::new()),
            state: SessionState::Idle,
            config: None,
            delay: FeedbackDelay::new(),
            scratch: Vec::new(),
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Begin a session with the given geometry
    ///
    /// Transition: Idle -> Running. The delay tap starts from silence and
    /// the working frame is allocated here, so processing itself never
    /// allocates. Starting while already Running is a usage error and
    /// leaves the running session untouched.
    pub fn start(&mut self, config: SessionConfig) -> Result<()> {
        if self.state == SessionState::Running {
            return Err(SidetoneError::SessionAlreadyRunning);
        }
        config.validate()?;

        self.delay.reset();
        self.scratch.clear();
        self.scratch.resize(config.frame_size, 0.0);
        self.config = Some(config);
        self.state = SessionState::Running;

        debug!(
            "session started: {} samples/frame at {} Hz ({:.1} ms frames)",
            config.frame_size,
            config.sample_rate,
            config.frame_duration_secs() * 1000.0
        );
        Ok(())
    }

    /// End the session, if one is running
    ///
    /// Transition: Running -> Idle. Safe to call at any time and in any
    /// state; stopping twice is a no-op. The carried delay sample is
    /// discarded so nothing leaks into the next session.
    pub fn stop(&mut self) {
        if self.state == SessionState::Running {
            self.delay.reset();
            self.config = None;
            self.state = SessionState::Idle;
            debug!("session stopped");
        }
    }

    // ========================================================================
    // Frame pipeline
    // ========================================================================

    /// Transform one frame into a caller-provided output buffer
    ///
    /// This is the real-time entry point: bounded, synchronous, and free
    /// of allocation, locking, and logging. Both slices must match the
    /// session frame size. Valid only while Running; the error cases leave
    /// all session state untouched so the caller can simply drop the frame
    /// and continue.
    pub fn process_frame_into(&mut self, input: &[i16], output: &mut [i16]) -> Result<()> {
        if self.state != SessionState::Running {
            return Err(SidetoneError::SessionNotRunning);
        }
        // scratch was sized at start; its length is the session frame size
        let expected = self.scratch.len();
        if input.len() != expected {
            return Err(SidetoneError::FrameSizeMismatch {
                expected,
                actual: input.len(),
            });
        }
        if output.len() != expected {
            return Err(SidetoneError::FrameSizeMismatch {
                expected,
                actual: output.len(),
            });
        }

        pcm_to_float(input, &mut self.scratch);

        // One parameter read per frame; a concurrent slider move lands on
        // the next frame at the latest.
        let params = self.params.snapshot();
        apply_gain(&mut self.scratch, params.volume);
        self.delay.process(&mut self.scratch, params.reverb_level);

        float_to_pcm(&self.scratch, output);
        Ok(())
    }

    /// Transform one frame into a freshly allocated buffer
    ///
    /// Convenience wrapper over [`process_frame_into`](Self::process_frame_into)
    /// for callers that are not latency-sensitive, such as offline file
    /// processing.
    pub fn process_frame(&mut self, input: &[i16]) -> Result<Vec<i16>> {
        let mut output = vec![0; input.len()];
        self.process_frame_into(input, &mut output)?;
        Ok(output)
    }

    // ========================================================================
    // Parameters and state queries
    // ========================================================================

    /// Handle to the shared parameter store for the control surface
    pub fn params(&self) -> Arc<MonitorParams> {
        Arc::clone(&self.params)
    }

    /// Set the volume, clamping to [0.0, 1.0]
    pub fn set_volume(&self, volume: f32) {
        self.params.set_volume(volume);
    }

    /// Set the reverb level, clamping to [0.0, 1.0]
    pub fn set_reverb_level(&self, level: f32) {
        self.params.set_reverb_level(level);
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether a session is running
    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Geometry of the running session, if any
    pub fn config(&self) -> Option<SessionConfig> {
        self.config
    }
}

impl Default for MonitorProcessor {
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

    fn running_processor(frame_size: usize) -> MonitorProcessor {
        let mut processor = MonitorProcessor::new();
        processor
            .start(SessionConfig::new(frame_size, 16_000))
            .unwrap();
        processor
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    #[test]
    fn test_new_processor_is_idle() {
        let processor = MonitorProcessor::new();
        assert_eq!(processor.state(), SessionState::Idle);
        assert!(!processor.is_running());
        assert!(processor.config().is_none());
    }

    #[test]
    fn test_start_transitions_to_running() {
        let processor = running_processor(512);
        assert!(processor.is_running());
        assert_eq!(processor.config().unwrap().frame_size, 512);
    }

    #[test]
    fn test_double_start_rejected_without_disturbing_session() {
        let mut processor = running_processor(4);
        // Prime the delay tap so corruption would be visible
        processor.set_reverb_level(1.0);
        processor.process_frame(&[0, 0, 0, 16384]).unwrap();

        let err = processor.start(SessionConfig::new(8, 48_000)).unwrap_err();
        assert!(matches!(err, SidetoneError::SessionAlreadyRunning));
        assert!(err.is_usage_error());

        // Original session still running with its geometry and tap intact
        assert_eq!(processor.config().unwrap().frame_size, 4);
        let output = processor.process_frame(&[0, 0, 0, 0]).unwrap();
        assert_eq!(output[0], 8192);
    }

    #[test]
    fn test_invalid_config_leaves_processor_idle() {
        let mut processor = MonitorProcessor::new();
        let err = processor.start(SessionConfig::new(0, 16_000)).unwrap_err();
        assert!(matches!(err, SidetoneError::InvalidConfig { .. }));
        assert!(!processor.is_running());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut processor = running_processor(4);
        processor.stop();
        assert!(!processor.is_running());
        processor.stop();
        assert!(!processor.is_running());

        let mut idle = MonitorProcessor::new();
        idle.stop();
        assert!(!idle.is_running());
    }

    #[test]
    fn test_process_while_idle_is_usage_error() {
        let mut processor = MonitorProcessor::new();
        let err = processor.process_frame(&[0, 0, 0, 0]).unwrap_err();
        assert!(matches!(err, SidetoneError::SessionNotRunning));
        assert!(err.is_usage_error());
    }

    #[test]
    fn test_process_after_stop_rejected() {
        let mut processor = running_processor(4);
        processor.process_frame(&[1, 2, 3, 4]).unwrap();
        processor.stop();

        let err = processor.process_frame(&[1, 2, 3, 4]).unwrap_err();
        assert!(matches!(err, SidetoneError::SessionNotRunning));
    }

    // ------------------------------------------------------------------------
    // Frame validation
    // ------------------------------------------------------------------------

    #[test]
    fn test_input_size_mismatch() {
        let mut processor = running_processor(4);
        let err = processor.process_frame(&[0, 0, 0]).unwrap_err();
        match err {
            SidetoneError::FrameSizeMismatch { expected, actual } => {
                assert_eq!(expected, 4);
                assert_eq!(actual, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_output_size_mismatch() {
        let mut processor = running_processor(4);
        let input = [0_i16; 4];
        let mut output = [0_i16; 5];
        let err = processor.process_frame_into(&input, &mut output).unwrap_err();
        assert!(matches!(
            err,
            SidetoneError::FrameSizeMismatch {
                expected: 4,
                actual: 5
            }
        ));
    }

    #[test]
    fn test_rejected_frame_does_not_touch_delay_state() {
        let mut processor = running_processor(4);
        processor.set_reverb_level(1.0);
        processor.process_frame(&[0, 0, 0, 16384]).unwrap();

        // Wrong-size frame is rejected without consuming the carried sample
        processor.process_frame(&[0, 0]).unwrap_err();

        let output = processor.process_frame(&[0, 0, 0, 0]).unwrap();
        assert_eq!(output[0], 8192);
    }

    // ------------------------------------------------------------------------
    // Pipeline behavior
    // ------------------------------------------------------------------------

    #[test]
    fn test_defaults_pass_first_sample_through() {
        // Default volume is unity and the tap has no history yet, so the
        // first sample of a session comes through unchanged.
        let mut processor = running_processor(4);
        let output = processor.process_frame(&[12000, 0, 0, 0]).unwrap();
        assert_eq!(output[0], 12000);
    }

    #[test]
    fn test_impulse_with_full_reverb() {
        let mut processor = running_processor(4);
        processor.set_volume(1.0);
        processor.set_reverb_level(1.0);

        // Half-scale impulse: echo lands one sample later at half strength
        let output = processor.process_frame(&[16384, 0, 0, 0]).unwrap();
        assert_eq!(output, vec![16384, 8192, 0, 0]);
    }

    #[test]
    fn test_gain_feeds_the_tap() {
        // The tap hears the volume-adjusted signal, so halving the volume
        // also halves the echo.
        let mut processor = running_processor(4);
        processor.set_volume(0.5);
        processor.set_reverb_level(1.0);

        let output = processor.process_frame(&[16384, 0, 0, 0]).unwrap();
        assert_eq!(output, vec![8192, 4096, 0, 0]);
    }

    #[test]
    fn test_zero_volume_silences_everything() {
        let mut processor = running_processor(4);
        processor.set_volume(0.0);
        processor.set_reverb_level(1.0);

        let output = processor.process_frame(&[16384, -16384, 32767, 1]).unwrap();
        assert_eq!(output, vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_tap_carries_across_frames() {
        let mut processor = running_processor(4);
        processor.set_reverb_level(1.0);

        processor.process_frame(&[0, 0, 0, 16384]).unwrap();
        let second = processor.process_frame(&[0, 0, 0, 0]).unwrap();
        assert_eq!(second, vec![8192, 0, 0, 0]);
    }

    #[test]
    fn test_restart_begins_from_silence() {
        let mut processor = running_processor(4);
        processor.set_reverb_level(1.0);
        processor.process_frame(&[0, 0, 0, 16384]).unwrap();

        processor.stop();
        processor.start(SessionConfig::new(4, 16_000)).unwrap();

        // No echo from the previous session's final sample
        let output = processor.process_frame(&[0, 0, 0, 0]).unwrap();
        assert_eq!(output, vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_restart_can_change_geometry() {
        let mut processor = running_processor(4);
        processor.process_frame(&[0, 0, 0, 0]).unwrap();
        processor.stop();

        processor.start(SessionConfig::new(8, 48_000)).unwrap();
        let output = processor.process_frame(&[0_i16; 8]).unwrap();
        assert_eq!(output.len(), 8);
    }

    #[test]
    fn test_overdrive_clamps_at_pcm_boundary() {
        // Full-scale input plus a full-strength echo exceeds i16 range;
        // the boundary clamps instead of wrapping.
        let mut processor = running_processor(4);
        processor.set_reverb_level(1.0);

        let output = processor
            .process_frame(&[i16::MAX, i16::MAX, 0, 0])
            .unwrap();
        assert_eq!(output[0], i16::MAX);
        assert_eq!(output[1], i16::MAX); // 1.5x full scale, clamped
    }

    #[test]
    fn test_parameter_handle_updates_between_frames() {
        let mut processor = running_processor(2);
        let params = processor.params();
        processor.set_reverb_level(0.0);

        let first = processor.process_frame(&[16384, 16384]).unwrap();
        assert_eq!(first, vec![16384, 16384]);

        params.set_volume(0.5);
        let second = processor.process_frame(&[16384, 16384]).unwrap();
        assert_eq!(second, vec![8192, 8192]);
    }
}
