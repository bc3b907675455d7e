//! Linear fade envelopes
//!
//! A fade-in ramps 0→1 across the buffer's leading edge, a fade-out ramps
//! 1→0 across the trailing edge. The window is clamped to the material being
//! faded; a zero or negative window is a no-op rather than an error.

use crate::engine::buffer::AudioBuffer;

/// Which edge of the buffer the envelope attacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    In,
    Out,
}

/// A fade request: direction plus window length in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeSpec {
    pub direction: FadeDirection,
    pub duration_secs: f64,
}

impl FadeSpec {
    pub fn new(direction: FadeDirection, duration_secs: f64) -> Self {
        Self {
            direction,
            duration_secs,
        }
    }
}

/// Apply a linear fade, returning a new buffer
pub fn fade(buffer: &AudioBuffer, spec: FadeSpec) -> AudioBuffer {
    let window = buffer.secs_to_frames(spec.duration_secs).min(buffer.frames());
    if window == 0 {
        return buffer.clone();
    }

    let channels = buffer.channels();
    let frames = buffer.frames();
    let mut samples = buffer.samples().to_vec();

    match spec.direction {
        FadeDirection::In => {
            for i in 0..window {
                let g = i as f32 / window as f32;
                for ch in 0..channels {
                    samples[i * channels + ch] *= g;
                }
            }
        }
        FadeDirection::Out => {
            let start = frames - window;
            for i in 0..window {
                let g = 1.0 - i as f32 / window as f32;
                for ch in 0..channels {
                    samples[(start + i) * channels + ch] *= g;
                }
            }
        }
    }

    buffer.with_samples(samples)
}

/// Fade the leading edge 0→1 over `duration_secs`
pub fn fade_in(buffer: &AudioBuffer, duration_secs: f64) -> AudioBuffer {
    fade(buffer, FadeSpec::new(FadeDirection::In, duration_secs))
}

/// Fade the trailing edge 1→0 over `duration_secs`
pub fn fade_out(buffer: &AudioBuffer, duration_secs: f64) -> AudioBuffer {
    fade(buffer, FadeSpec::new(FadeDirection::Out, duration_secs))
}
