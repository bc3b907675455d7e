//! Sample-wise overlay of two buffers
//!
//! Gain staging happens before overlay, not during it: the −20 dB bed and
//! −10 dB stinger offsets are the primary headroom defense, the clamp here
//! is only a safety net.

use crate::engine::buffer::AudioBuffer;
use crate::error::{MixdownError, Result};

/// Mix `addition` onto the leading span of `base`, returning a new buffer
///
/// `addition` must not outlast `base`; the un-overlapped remainder of `base`
/// passes through unchanged. The sum is clamped to [-1.0, 1.0].
///
/// # Errors
/// * `FormatMismatch` - differing sample rate or channel count, or an
///   `addition` longer than `base` (caller bug, fail fast)
pub fn overlay(base: &AudioBuffer, addition: &AudioBuffer) -> Result<AudioBuffer> {
    base.ensure_compatible(addition)?;

    if addition.frames() > base.frames() {
        return Err(MixdownError::FormatMismatch {
            details: format!(
                "overlay addition outlasts base ({} > {} frames)",
                addition.frames(),
                base.frames()
            ),
        });
    }

    let mut samples = base.samples().to_vec();
    for (out, add) in samples.iter_mut().zip(addition.samples()) {
        *out = (*out + *add).clamp(-1.0, 1.0);
    }

    Ok(base.with_samples(samples))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(value: f32, frames: usize, channels: usize, rate: u32) -> AudioBuffer {
        AudioBuffer::from_interleaved(vec![value; frames * channels], channels, rate).unwrap()
    }

    #[test]
    fn test_overlay_preserves_base_duration() {
        let base = constant(0.5, 100, 1, 44100);
        let addition = constant(0.25, 40, 1, 44100);
        let mixed = overlay(&base, &addition).unwrap();

        assert_eq!(mixed.frames(), 100);
        assert!((mixed.samples()[0] - 0.75).abs() < 1e-6);
        assert!((mixed.samples()[39] - 0.75).abs() < 1e-6);
        // Remainder of base passes through unchanged
        assert!((mixed.samples()[40] - 0.5).abs() < 1e-6);
        assert!((mixed.samples()[99] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_overlay_equal_length() {
        let base = constant(0.3, 50, 2, 48000);
        let addition = constant(0.2, 50, 2, 48000);
        let mixed = overlay(&base, &addition).unwrap();
        assert_eq!(mixed.frames(), 50);
        for &s in mixed.samples() {
            assert!((s - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_overlay_clamps() {
        let base = constant(0.9, 10, 1, 44100);
        let addition = constant(0.9, 10, 1, 44100);
        let mixed = overlay(&base, &addition).unwrap();
        for &s in mixed.samples() {
            assert_eq!(s, 1.0);
        }
    }

    #[test]
    fn test_overlay_rejects_format_mismatch() {
        let base = constant(0.5, 100, 2, 44100);
        let wrong_rate = constant(0.5, 100, 2, 48000);
        let wrong_channels = constant(0.5, 100, 1, 44100);

        assert!(matches!(
            overlay(&base, &wrong_rate),
            Err(MixdownError::FormatMismatch { .. })
        ));
        assert!(matches!(
            overlay(&base, &wrong_channels),
            Err(MixdownError::FormatMismatch { .. })
        ));
    }

    #[test]
    fn test_overlay_rejects_longer_addition() {
        let base = constant(0.5, 10, 1, 44100);
        let addition = constant(0.5, 11, 1, 44100);
        assert!(matches!(
            overlay(&base, &addition),
            Err(MixdownError::FormatMismatch { .. })
        ));
    }
}
