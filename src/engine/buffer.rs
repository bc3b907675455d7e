//! Audio buffer type for clip composition
//!
//! Samples are stored in interleaved format: [L0, R0, L1, R1, ...]
//! This matches the decode and encode boundaries and simplifies I/O.
//!
//! Buffers are value types: every transform returns a new buffer, and a
//! buffer is never mutated after it has been handed to a consumer.

use crate::error::{MixdownError, Result};

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert decibels to linear amplitude
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

/// Convert linear amplitude to decibels
///
/// Returns -f32::INFINITY for zero or negative input.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        f32::NEG_INFINITY
    } else {
        20.0 * linear.log10()
    }
}

// ============================================================================
// Audio Buffer
// ============================================================================

/// Interleaved audio buffer
///
/// Owned sample storage plus format metadata. Two buffers are compatible
/// only if sample rate and channel count match; mixing or concatenating
/// incompatible buffers is a caller bug and fails fast, never resamples.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioBuffer {
    /// Interleaved sample data
    samples: Vec<f32>,
    /// Number of channels (1 = mono, 2 = stereo)
    channels: usize,
    /// Sample rate in Hz
    sample_rate: u32,
}

impl AudioBuffer {
    /// Create a buffer from existing interleaved samples
    pub fn from_interleaved(samples: Vec<f32>, channels: usize, sample_rate: u32) -> Result<Self> {
        if channels == 0 {
            return Err(MixdownError::UnsupportedFormat {
                format: "0-channel audio".to_string(),
            });
        }
        if samples.len() % channels != 0 {
            return Err(MixdownError::UnsupportedFormat {
                format: format!(
                    "sample count {} is not divisible by channel count {}",
                    samples.len(),
                    channels
                ),
            });
        }
        Ok(Self {
            samples,
            channels,
            sample_rate,
        })
    }

    /// Create a silent buffer of the given length
    pub fn silence(frames: usize, channels: usize, sample_rate: u32) -> Self {
        Self {
            samples: vec![0.0; frames * channels],
            channels,
            sample_rate,
        }
    }

    /// Create an empty buffer sharing this buffer's format
    pub fn empty_like(&self) -> Self {
        Self {
            samples: Vec::new(),
            channels: self.channels,
            sample_rate: self.sample_rate,
        }
    }

    /// New buffer with the same format but different sample data
    ///
    /// The replacement data must keep whole frames.
    pub(crate) fn with_samples(&self, samples: Vec<f32>) -> Self {
        debug_assert_eq!(samples.len() % self.channels, 0);
        Self {
            samples,
            channels: self.channels,
            sample_rate: self.sample_rate,
        }
    }

    /// Interleaved sample data
    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Number of channels
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Sample rate in Hz
    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of frames (samples per channel)
    #[inline]
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels
    }

    /// Whether the buffer holds no frames
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds
    #[inline]
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Convert a duration in seconds to a frame count at this buffer's rate
    #[inline]
    pub fn secs_to_frames(&self, secs: f64) -> usize {
        if secs <= 0.0 {
            return 0;
        }
        (secs * self.sample_rate as f64).round() as usize
    }

    /// Leading slice of the buffer, at most `frames` long
    pub fn head(&self, frames: usize) -> Self {
        let end = frames.min(self.frames()) * self.channels;
        self.with_samples(self.samples[..end].to_vec())
    }

    /// Check format compatibility with another buffer
    pub fn is_compatible_with(&self, other: &Self) -> bool {
        self.sample_rate == other.sample_rate && self.channels == other.channels
    }

    /// Fail fast when two buffers cannot be mixed or concatenated
    pub fn ensure_compatible(&self, other: &Self) -> Result<()> {
        if self.is_compatible_with(other) {
            return Ok(());
        }
        Err(MixdownError::FormatMismatch {
            details: format!(
                "{} Hz/{}ch vs {} Hz/{}ch",
                self.sample_rate, self.channels, other.sample_rate, other.channels
            ),
        })
    }

    /// Peak absolute sample value
    pub fn peak(&self) -> f32 {
        self.samples.iter().map(|s| s.abs()).fold(0.0_f32, f32::max)
    }

    /// Check that all samples are finite (no NaN/Inf)
    pub fn is_finite(&self) -> bool {
        self.samples.iter().all(|s| s.is_finite())
    }
}

// ============================================================================
// Tests
// ============================================================================
