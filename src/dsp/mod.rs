//! Signal processing stages
//!
//! The three building blocks of the monitoring pipeline, in the order the
//! processor applies them: PCM conversion in, gain, feedback delay, PCM
//! conversion out. Conversion and gain are pure; the delay stage is the
//! only one that carries state between frames.

pub mod convert;
pub mod delay;
pub mod gain;

pub use convert::{float_to_pcm, pcm_to_float, sample_to_float, sample_to_pcm, PCM_SCALE};
pub use delay::{FeedbackDelay, DECAY_SCALE};
pub use gain::apply_gain;
